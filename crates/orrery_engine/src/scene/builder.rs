//! Scene construction from configuration
//!
//! Maps the authoring units of the scene description (pixel-space
//! positions, 0-255 colors, editor radii and speeds) into world units and
//! links the resulting bodies into parent/child trees. The conversion
//! constants are inherited from the scene editor's coordinate system and
//! must match it.

use crate::config::SceneConfig;
use crate::foundation::math::{Color, Vec3};
use crate::scene::body::{CelestialBody, DEPTH_PLANE};
use crate::scene::{SceneError, SceneGraph};

// Pixel space -> world unit mapping.
const POSITION_X_OFFSET: f32 = 550.0;
const POSITION_Y_OFFSET: f32 = 200.0;
const POSITION_SCALE: f32 = 150.0;
const RADIUS_SCALE: f32 = 400.0;
const ROTATION_SPEED_SCALE: f32 = 50.0;
const COLOR_SCALE: f32 = 255.0;

// Material defaults applied at import time. Emission stays dark here; a
// light source is authored by overriding the built body afterwards.
const IMPORT_REFLECTION: f32 = 1.0;
const IMPORT_TRANSPARENCY: f32 = 0.5;

/// Build a resolved scene graph from a scene configuration
///
/// Converts every configured body into world units, inserts it into the
/// arena, and resolves the parent hierarchy. Any structural problem
/// (unknown parent, cycle, bad radius) aborts before a single frame runs.
pub fn build_scene(config: &SceneConfig) -> Result<SceneGraph, SceneError> {
    let mut graph = SceneGraph::new();

    for entry in &config.bodies {
        if entry.radius <= 0.0 {
            return Err(SceneError::InvalidRadius {
                name: entry.name.clone(),
                radius: entry.radius,
            });
        }

        let center = Vec3::new(
            (entry.position_x - POSITION_X_OFFSET) / POSITION_SCALE,
            (entry.position_y - POSITION_Y_OFFSET) / POSITION_SCALE,
            DEPTH_PLANE,
        );
        let surface_color = Color::new(
            entry.color[0] / COLOR_SCALE,
            entry.color[1] / COLOR_SCALE,
            entry.color[2] / COLOR_SCALE,
        );

        let mut body = CelestialBody::new(
            entry.name.clone(),
            entry.root,
            center,
            entry.radius / RADIUS_SCALE,
            surface_color,
            IMPORT_REFLECTION,
            IMPORT_TRANSPARENCY,
            Color::zeros(),
            entry.rotation_speed / ROTATION_SPEED_SCALE,
        );
        if !entry.root {
            body.parent_name = entry.parent.clone();
        }
        graph.insert(body);
    }

    graph.resolve_hierarchy()?;

    log::info!(
        "built scene: {} bodies, {} roots",
        graph.len(),
        graph.roots().len()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodyConfig;

    const EPSILON: f32 = 0.0001;

    fn entry(name: &str, x: f32, y: f32, root: bool, parent: Option<&str>) -> BodyConfig {
        BodyConfig {
            name: name.into(),
            position_x: x,
            position_y: y,
            color: [255.0, 127.5, 0.0],
            radius: 400.0,
            rotation_speed: 50.0,
            root,
            parent: parent.map(str::to_string),
        }
    }

    #[test]
    fn test_unit_conversion() {
        let config = SceneConfig {
            bodies: vec![entry("sun", 550.0, 200.0, true, None)],
            ..Default::default()
        };
        let graph = build_scene(&config).unwrap();
        let sun = graph.get(graph.find_by_name("sun").unwrap());

        // (550, 200) is the pixel-space origin; it maps to (0, 0) on the
        // depth plane.
        assert!((sun.center - Vec3::new(0.0, 0.0, DEPTH_PLANE)).norm() < EPSILON);
        assert!((sun.radius - 1.0).abs() < EPSILON);
        assert!((sun.radius_sq - 1.0).abs() < EPSILON);
        assert!((sun.rotation_speed - 1.0).abs() < EPSILON);
        assert!((sun.surface_color.x - 1.0).abs() < EPSILON);
        assert!((sun.surface_color.y - 0.5).abs() < EPSILON);
        assert!(sun.surface_color.z.abs() < EPSILON);
    }

    #[test]
    fn test_import_material_defaults() {
        let config = SceneConfig {
            bodies: vec![entry("sun", 550.0, 200.0, true, None)],
            ..Default::default()
        };
        let graph = build_scene(&config).unwrap();
        let sun = graph.get(graph.find_by_name("sun").unwrap());
        assert!((sun.reflection - 1.0).abs() < EPSILON);
        assert!((sun.transparency - 0.5).abs() < EPSILON);
        assert_eq!(sun.emission_color, Color::zeros());
    }

    #[test]
    fn test_parent_on_root_is_ignored() {
        let config = SceneConfig {
            bodies: vec![entry("sun", 550.0, 200.0, true, Some("anything"))],
            ..Default::default()
        };
        let graph = build_scene(&config).unwrap();
        assert!(graph.get(graph.find_by_name("sun").unwrap()).parent_name.is_none());
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let mut bad = entry("sun", 550.0, 200.0, true, None);
        bad.radius = 0.0;
        let config = SceneConfig {
            bodies: vec![bad],
            ..Default::default()
        };
        assert!(matches!(
            build_scene(&config),
            Err(SceneError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn test_hierarchy_errors_surface_through_builder() {
        let config = SceneConfig {
            bodies: vec![
                entry("sun", 550.0, 200.0, true, None),
                entry("earth", 700.0, 200.0, false, Some("vulcan")),
            ],
            ..Default::default()
        };
        assert!(matches!(
            build_scene(&config),
            Err(SceneError::UnresolvedParent { .. })
        ));
    }
}
