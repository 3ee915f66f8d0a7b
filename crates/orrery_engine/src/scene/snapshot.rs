//! Immutable per-frame scene snapshots
//!
//! Render jobs never see the live, animated scene graph. Each frame gets an
//! independent deep copy of every body, so jobs running out of order and
//! overlapped can never race on mutable body state.

use crate::foundation::math::Color;
use crate::scene::body::CelestialBody;

// Material values every body is reset to when captured for rendering.
pub(crate) const SNAPSHOT_REFLECTION: f32 = 1.0;
pub(crate) const SNAPSHOT_TRANSPARENCY: f32 = 0.5;

/// Independent copy of all bodies captured for one frame's render job
///
/// Hierarchy links are dropped in the copy: the ray tracer treats the
/// scene as a flat list of spheres, and the snapshot must not keep any
/// tie to the live graph.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    bodies: Vec<CelestialBody>,
}

impl SceneSnapshot {
    /// Capture a snapshot from the live body arena
    ///
    /// Every body is cloned and reset to the frame-render material
    /// defaults: no emission, full reflection, half transparency.
    pub(crate) fn capture(live: &[CelestialBody]) -> Self {
        let bodies = live
            .iter()
            .map(|body| {
                let mut copy = body.clone();
                copy.emission_color = Color::zeros();
                copy.reflection = SNAPSHOT_REFLECTION;
                copy.transparency = SNAPSHOT_TRANSPARENCY;
                copy.parent = None;
                copy.parent_name = None;
                copy.children.clear();
                copy
            })
            .collect();
        Self { bodies }
    }

    /// Build a snapshot directly from a body list
    ///
    /// Bodies are taken as-is, materials included. This is the entry point
    /// for rendering hand-built scenes.
    pub fn from_bodies(bodies: Vec<CelestialBody>) -> Self {
        Self { bodies }
    }

    /// The captured bodies
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Number of captured bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::SceneGraph;

    fn graph_with_one_body() -> SceneGraph {
        let mut graph = SceneGraph::new();
        graph.insert(CelestialBody::new(
            "sol",
            true,
            Vec3::new(0.0, 0.0, -10.0),
            1.0,
            Color::new(0.9, 0.8, 0.1),
            0.0,
            0.0,
            Color::new(1.0, 1.0, 1.0),
            0.0,
        ));
        graph
    }

    #[test]
    fn test_snapshot_applies_frame_material_defaults() {
        let graph = graph_with_one_body();
        let snapshot = graph.snapshot();
        let body = &snapshot.bodies()[0];
        assert_eq!(body.emission_color, Color::zeros());
        assert!((body.reflection - SNAPSHOT_REFLECTION).abs() < f32::EPSILON);
        assert!((body.transparency - SNAPSHOT_TRANSPARENCY).abs() < f32::EPSILON);
    }

    #[test]
    fn test_snapshot_is_independent_of_live_scene() {
        let mut graph = graph_with_one_body();
        let snapshot = graph.snapshot();

        let id = graph.find_by_name("sol").unwrap();
        graph.get_mut(id).center = Vec3::new(99.0, 0.0, 0.0);
        graph.get_mut(id).surface_color = Color::zeros();

        let body = &snapshot.bodies()[0];
        assert!((body.center - Vec3::new(0.0, 0.0, -10.0)).norm() < f32::EPSILON);
        assert!(body.surface_color.x > 0.0);
    }

    #[test]
    fn test_snapshot_drops_hierarchy_links() {
        let mut graph = SceneGraph::new();
        let root = CelestialBody::new(
            "a",
            true,
            Vec3::zeros(),
            1.0,
            Color::zeros(),
            0.0,
            0.0,
            Color::zeros(),
            0.0,
        );
        graph.insert(root);
        let mut child = CelestialBody::new(
            "b",
            false,
            Vec3::new(1.0, 0.0, 0.0),
            1.0,
            Color::zeros(),
            0.0,
            0.0,
            Color::zeros(),
            0.0,
        );
        child.parent_name = Some("a".into());
        graph.insert(child);
        graph.resolve_hierarchy().unwrap();

        let snapshot = graph.snapshot();
        assert!(snapshot.bodies().iter().all(|b| b.parent.is_none()));
        assert!(snapshot.bodies().iter().all(|b| b.children.is_empty()));
    }
}
