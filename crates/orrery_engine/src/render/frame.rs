//! Per-frame rendering
//!
//! Shoots one primary ray per pixel through a fixed pinhole camera at the
//! origin looking down -z, and collects the traced colors into a flat
//! row-major framebuffer. Pixels carry no cross-pixel state; frames are
//! the unit of parallelism, so the pixel loop itself stays sequential.

use crate::foundation::math::{utils, Color, Vec3};
use crate::render::tracer::trace;
use crate::scene::SceneSnapshot;

/// Vertical field of view of the pinhole camera, in degrees
pub const FIELD_OF_VIEW: f32 = 30.0;

/// Flat row-major buffer of linear RGB pixels for one frame
///
/// Values are unclamped floats; clamping to 8-bit channels happens when
/// the buffer is encoded by the image writer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a framebuffer filled with black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zeros(); (width * height) as usize],
        }
    }

    /// Buffer width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major order
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Read one pixel
    ///
    /// # Panics
    /// Panics if the coordinates are outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Overwrite one pixel
    ///
    /// # Panics
    /// Panics if the coordinates are outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }
}

/// Direction of the primary ray through pixel (x, y), not yet normalized
fn primary_ray(x: u32, y: u32, width: u32, height: u32) -> Vec3 {
    let inv_width = 1.0 / width as f32;
    let inv_height = 1.0 / height as f32;
    let aspect_ratio = width as f32 / height as f32;
    let angle = utils::deg_to_rad(FIELD_OF_VIEW * 0.5).tan();

    let xx = (2.0 * ((x as f32 + 0.5) * inv_width) - 1.0) * angle * aspect_ratio;
    let yy = (1.0 - 2.0 * ((y as f32 + 0.5) * inv_height)) * angle;
    Vec3::new(xx, yy, -1.0)
}

/// Render one frame of the given snapshot into a fresh framebuffer
pub fn render_frame(snapshot: &SceneSnapshot, width: u32, height: u32) -> Framebuffer {
    let mut framebuffer = Framebuffer::new(width, height);
    let bodies = snapshot.bodies();

    for y in 0..height {
        for x in 0..width {
            let ray_dir = primary_ray(x, y, width, height).normalize();
            framebuffer.set_pixel(x, y, trace(Vec3::zeros(), ray_dir, bodies, 0));
        }
    }

    framebuffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tracer::background_color;
    use crate::scene::CelestialBody;

    const EPSILON: f32 = 0.001;

    #[test]
    fn test_empty_scene_renders_background() {
        let snapshot = SceneSnapshot::from_bodies(Vec::new());
        let framebuffer = render_frame(&snapshot, 4, 2);
        assert_eq!(framebuffer.pixels().len(), 8);
        assert!(framebuffer
            .pixels()
            .iter()
            .all(|p| (p - background_color()).norm() < EPSILON));
    }

    #[test]
    fn test_center_pixel_looks_straight_down_z() {
        // The single pixel of a 1x1 image maps to the exact view axis.
        let dir = primary_ray(0, 0, 1, 1);
        assert!(dir.x.abs() < EPSILON);
        assert!(dir.y.abs() < EPSILON);
        assert!((dir.z + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_single_pixel_lit_sphere() {
        // One diffuse sphere straight ahead, one light behind the camera:
        // the pixel picks up the full-incidence Lambertian term.
        let surface = Color::new(0.8, 0.6, 0.4);
        let bodies = vec![
            CelestialBody::new(
                "planet",
                true,
                Vec3::new(0.0, 0.0, -5.0),
                1.0,
                surface,
                0.0,
                0.0,
                Color::zeros(),
                0.0,
            ),
            CelestialBody::new(
                "sun",
                true,
                Vec3::new(0.0, 0.0, 5.0),
                1.0,
                Color::zeros(),
                0.0,
                0.0,
                Color::new(1.0, 1.0, 1.0),
                0.0,
            ),
        ];
        let framebuffer = render_frame(&SceneSnapshot::from_bodies(bodies), 1, 1);
        let pixel = framebuffer.pixel(0, 0);
        assert!((pixel - surface).norm() < EPSILON);
    }

    #[test]
    fn test_framebuffer_row_major_addressing() {
        let mut framebuffer = Framebuffer::new(3, 2);
        framebuffer.set_pixel(2, 1, Color::new(1.0, 0.0, 0.0));
        assert!((framebuffer.pixels()[5].x - 1.0).abs() < EPSILON);
        assert!((framebuffer.pixel(2, 1).x - 1.0).abs() < EPSILON);
    }
}
