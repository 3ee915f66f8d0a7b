//! Celestial body data and sphere geometry
//!
//! A body is a sphere with material and orbital attributes. Bodies carry
//! their own ray intersection test and know how to compute their position
//! on a circular orbit around a parent; the recursive top-down update over
//! the whole hierarchy lives in [`super::SceneGraph`].

use crate::foundation::math::{Color, Vec3};
use crate::scene::BodyId;

/// Depth plane on which all orbital motion happens
///
/// Bodies are placed and kept at this z while orbiting; only the per-frame
/// root drift moves a body off it.
pub(crate) const DEPTH_PLANE: f32 = -10.0;

// Inherited phase-alignment constants. The axis weighting is asymmetric on
// purpose; changing either value recalibrates every orbit's starting phase.
const PHASE_AXIS_WEIGHT: f32 = 100.0;
const PHASE_MULTIPLIER: f32 = 5.0;

/// One sphere in the scene: planet, moon, or light source
///
/// A non-zero emission color marks the body as a light. Reflection and
/// transparency are conventionally in [0, 1] but are not clamped.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    /// Unique body name; hierarchy references resolve against it
    pub name: String,
    /// Center position in world space
    pub center: Vec3,
    /// Sphere radius
    pub radius: f32,
    /// Cached squared radius; kept in sync with `radius`
    pub radius_sq: f32,
    /// Surface color, linear RGB in [0, 1]
    pub surface_color: Color,
    /// Emission color; non-zero makes this body a light source
    pub emission_color: Color,
    /// Reflection coefficient
    pub reflection: f32,
    /// Transparency coefficient
    pub transparency: f32,
    /// Orbital angular speed
    pub rotation_speed: f32,
    /// Orbital phase offset, derived at parent-attachment time
    pub start_angle: f32,
    /// Orbit radius, derived at parent-attachment time
    pub orbit_magnitude: f32,
    /// Whether this body is a root (orbits nothing)
    pub is_root: bool,
    /// Configured parent name, resolved by the scene graph
    pub parent_name: Option<String>,
    /// Resolved parent id; `None` until hierarchy resolution runs
    pub parent: Option<BodyId>,
    /// Resolved direct children ids
    pub children: Vec<BodyId>,
}

impl CelestialBody {
    /// Create a body from explicit material and orbital parameters
    pub fn new(
        name: impl Into<String>,
        is_root: bool,
        center: Vec3,
        radius: f32,
        surface_color: Color,
        reflection: f32,
        transparency: f32,
        emission_color: Color,
        rotation_speed: f32,
    ) -> Self {
        Self {
            name: name.into(),
            center,
            radius,
            radius_sq: radius * radius,
            surface_color,
            emission_color,
            reflection,
            transparency,
            rotation_speed,
            start_angle: 0.0,
            orbit_magnitude: 0.0,
            is_root,
            parent_name: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the radius, keeping the cached square in sync
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.radius_sq = radius * radius;
    }

    /// Ray-sphere intersection using the geometric solution
    ///
    /// Returns both roots `(t0, t1)` with `t0 <= t1`; `t0` may be negative
    /// when the ray origin is inside the sphere, and the caller decides
    /// which root is valid. A sphere whose center lies behind the origin
    /// along the ray is reported as a miss, which also rejects a ray
    /// starting inside the sphere and pointing away from its center: a
    /// known approximation, kept deliberately.
    pub fn intersect(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<(f32, f32)> {
        let l = self.center - ray_origin;
        let tca = l.dot(&ray_dir);
        if tca < 0.0 {
            return None;
        }
        let d2 = l.dot(&l) - tca * tca;
        if d2 > self.radius_sq {
            return None;
        }
        let thc = (self.radius_sq - d2).sqrt();
        Some((tca - thc, tca + thc))
    }

    /// Position on this body's orbit around `parent_pos` at simulated `time`
    ///
    /// The orbit is a circle of radius `orbit_magnitude` in the x/y plane;
    /// z stays on the fixed depth plane.
    pub fn orbit_position(&self, parent_pos: Vec3, time: f32) -> Vec3 {
        let angle = self.rotation_speed * (time + self.start_angle);
        Vec3::new(
            parent_pos.x + self.orbit_magnitude * angle.cos(),
            parent_pos.y + self.orbit_magnitude * angle.sin(),
            DEPTH_PLANE,
        )
    }

    /// Derive orbit magnitude and phase offset from the current offset to
    /// the parent
    ///
    /// Called exactly once, when the hierarchy is resolved; the derived
    /// values are never recomputed afterwards.
    pub(crate) fn derive_orbit(&mut self, parent_pos: Vec3) {
        let distance = parent_pos - self.center;
        self.orbit_magnitude = (distance.x * distance.x + distance.y * distance.y).sqrt();

        let dot = PHASE_AXIS_WEIGHT * distance.x;
        let det = PHASE_AXIS_WEIGHT * distance.y;
        self.start_angle = det.atan2(-dot) * PHASE_MULTIPLIER;
    }
}
