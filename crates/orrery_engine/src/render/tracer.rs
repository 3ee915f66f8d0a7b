//! Recursive ray tracing
//!
//! A single entry point, [`trace`], shades one ray against a flat list of
//! spheres: nearest intersection, then either a reflective/refractive blend
//! (recursing up to [`MAX_RAY_DEPTH`]) or Lambertian shading with shadow
//! rays toward every emissive body.

use crate::foundation::math::{utils, Color, Vec3};
use crate::scene::CelestialBody;

/// Maximum recursion depth for reflection and refraction rays
///
/// With a branching factor of two this bounds the recursive calls per
/// primary ray at `2^(MAX_RAY_DEPTH + 1)`.
pub const MAX_RAY_DEPTH: u32 = 5;

/// Index of refraction used for all transparent bodies
const INDEX_OF_REFRACTION: f32 = 1.1;

/// Offset along the surface normal before casting secondary rays, so a
/// reflection or shadow ray cannot immediately re-hit its own surface.
const BIAS: f32 = 1e-4;

/// Color returned for rays that escape the scene
///
/// Deliberately above 1.0 per channel; it clamps to pure white when a
/// framebuffer is encoded.
pub fn background_color() -> Color {
    Color::repeat(2.0)
}

/// Shade one ray against the scene
///
/// `ray_dir` must be normalized. `depth` is the current recursion level;
/// primary rays start at 0.
pub fn trace(ray_origin: Vec3, ray_dir: Vec3, bodies: &[CelestialBody], depth: u32) -> Color {
    // Nearest intersection wins; a negative near root means the origin is
    // inside the sphere, in which case the far root is the visible one.
    let mut t_near = f32::INFINITY;
    let mut nearest: Option<usize> = None;
    for (index, body) in bodies.iter().enumerate() {
        if let Some((mut t0, t1)) = body.intersect(ray_origin, ray_dir) {
            if t0 < 0.0 {
                t0 = t1;
            }
            if t0 < t_near {
                t_near = t0;
                nearest = Some(index);
            }
        }
    }

    let Some(hit_index) = nearest else {
        return background_color();
    };
    let body = &bodies[hit_index];

    let phit = ray_origin + ray_dir * t_near;
    let mut nhit = (phit - body.center).normalize();

    // A normal facing along the ray means we hit the inside of the sphere;
    // flip it and remember the side for the refraction index.
    let mut inside = false;
    if ray_dir.dot(&nhit) > 0.0 {
        nhit = -nhit;
        inside = true;
    }

    let mut surface_color = Color::zeros();

    if (body.transparency > 0.0 || body.reflection > 0.0) && depth < MAX_RAY_DEPTH {
        let facing_ratio = -ray_dir.dot(&nhit);
        let fresnel = utils::lerp((1.0 - facing_ratio).powi(3), 1.0, 0.1);

        let reflect_dir = (ray_dir - nhit * 2.0 * ray_dir.dot(&nhit)).normalize();
        let reflection = trace(phit + nhit * BIAS, reflect_dir, bodies, depth + 1);

        let mut refraction = Color::zeros();
        if body.transparency > 0.0 {
            let eta = if inside {
                INDEX_OF_REFRACTION
            } else {
                1.0 / INDEX_OF_REFRACTION
            };
            let cosi = -nhit.dot(&ray_dir);
            let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
            // Negative discriminant is total internal reflection: there is
            // no transmitted ray, so the refraction term stays dark.
            if k >= 0.0 {
                let refract_dir = (ray_dir * eta + nhit * (eta * cosi - k.sqrt())).normalize();
                refraction = trace(phit - nhit * BIAS, refract_dir, bodies, depth + 1);
            }
        }

        surface_color = (reflection * fresnel
            + refraction * ((1.0 - fresnel) * body.transparency))
            .component_mul(&body.surface_color);
    } else {
        // Diffuse surface: accumulate the Lambertian contribution of every
        // light that is not blocked by another body.
        for (light_index, light) in bodies.iter().enumerate() {
            if light.emission_color.x <= 0.0 {
                continue;
            }
            let light_dir = (light.center - phit).normalize();
            let mut shadowed = false;
            for (other_index, other) in bodies.iter().enumerate() {
                if other_index != light_index
                    && other.intersect(phit + nhit * BIAS, light_dir).is_some()
                {
                    shadowed = true;
                    break;
                }
            }
            if !shadowed {
                surface_color += body
                    .surface_color
                    .component_mul(&light.emission_color)
                    * nhit.dot(&light_dir).max(0.0);
            }
        }
    }

    surface_color + body.emission_color
}
