//! Scene graph: arena-backed body hierarchy
//!
//! Bodies live in a flat arena and reference each other by stable ids, so
//! the parent/child structure stays a plain forest with no owning cycles.
//! Hierarchy resolution binds configured parent names to ids, derives each
//! body's orbit from its authored offset, and validates the forest property
//! before any frame is scheduled.

use thiserror::Error;

use crate::scene::body::CelestialBody;
use crate::scene::snapshot::SceneSnapshot;

/// Stable identifier of a body within its [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// Structural scene errors, all fatal before rendering starts
#[derive(Error, Debug)]
pub enum SceneError {
    /// Two bodies share a name, making parent references ambiguous
    #[error("duplicate body name: {0}")]
    DuplicateName(String),

    /// A configured parent name matches no body
    #[error("body {body} references unknown parent {parent}")]
    UnresolvedParent {
        /// Name of the referencing body
        body: String,
        /// The parent name that failed to resolve
        parent: String,
    },

    /// A non-root body has no parent configured
    #[error("non-root body {0} has no parent")]
    MissingParent(String),

    /// The parent relation loops back on itself
    #[error("cycle detected in body hierarchy at {0}")]
    CycleDetected(String),

    /// A body was configured with a non-positive radius
    #[error("body {name} has invalid radius {radius}")]
    InvalidRadius {
        /// Name of the offending body
        name: String,
        /// The rejected radius value
        radius: f32,
    },
}

/// Arena of celestial bodies linked into parent/child trees
#[derive(Debug, Default)]
pub struct SceneGraph {
    bodies: Vec<CelestialBody>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Add a body to the arena, returning its stable id
    pub fn insert(&mut self, body: CelestialBody) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Get a body by id
    ///
    /// # Panics
    /// Panics if the id does not belong to this graph.
    pub fn get(&self, id: BodyId) -> &CelestialBody {
        &self.bodies[id.0]
    }

    /// Get a body mutably by id
    ///
    /// # Panics
    /// Panics if the id does not belong to this graph.
    pub fn get_mut(&mut self, id: BodyId) -> &mut CelestialBody {
        &mut self.bodies[id.0]
    }

    /// Number of bodies in the graph
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the graph holds no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate over all bodies
    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    /// Find a body id by name
    pub fn find_by_name(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    /// Ids of all root bodies
    pub fn roots(&self) -> Vec<BodyId> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_root)
            .map(|(i, _)| BodyId(i))
            .collect()
    }

    /// Resolve configured parent names into ids and derive orbits
    ///
    /// Every non-root body must name an existing parent. Each resolved body
    /// derives its orbit magnitude and phase offset from its authored
    /// offset to the parent, exactly once. Finishes by validating that the
    /// relation is a forest.
    pub fn resolve_hierarchy(&mut self) -> Result<(), SceneError> {
        for (i, body) in self.bodies.iter().enumerate() {
            if self.bodies.iter().skip(i + 1).any(|other| other.name == body.name) {
                return Err(SceneError::DuplicateName(body.name.clone()));
            }
        }

        for index in 0..self.bodies.len() {
            if self.bodies[index].is_root {
                continue;
            }
            let body_name = self.bodies[index].name.clone();
            let parent_name = self.bodies[index]
                .parent_name
                .clone()
                .ok_or(SceneError::MissingParent(body_name.clone()))?;
            let parent_id = self
                .find_by_name(&parent_name)
                .ok_or(SceneError::UnresolvedParent {
                    body: body_name,
                    parent: parent_name,
                })?;

            let parent_pos = self.bodies[parent_id.0].center;
            let body = &mut self.bodies[index];
            body.parent = Some(parent_id);
            body.derive_orbit(parent_pos);
            self.bodies[parent_id.0].children.push(BodyId(index));
        }

        self.validate_forest()?;

        log::debug!(
            "resolved hierarchy: {} bodies, {} roots",
            self.bodies.len(),
            self.roots().len()
        );
        Ok(())
    }

    /// Check that no body is reachable from itself through parent links
    fn validate_forest(&self) -> Result<(), SceneError> {
        for start in 0..self.bodies.len() {
            let mut current = self.bodies[start].parent;
            let mut steps = 0;
            while let Some(parent) = current {
                if parent.0 == start || steps > self.bodies.len() {
                    return Err(SceneError::CycleDetected(self.bodies[start].name.clone()));
                }
                current = self.bodies[parent.0].parent;
                steps += 1;
            }
        }
        Ok(())
    }

    /// Reposition every orbiting body for the given simulated time
    ///
    /// Runs depth-first from each root: a child's new center is computed
    /// against its parent's already-updated center within the same step.
    /// Roots themselves do not orbit.
    pub fn update_orbits(&mut self, time: f32) {
        for root in self.roots() {
            self.update_subtree(root, time);
        }
    }

    fn update_subtree(&mut self, id: BodyId, time: f32) {
        let parent_pos = self.bodies[id.0].center;
        let children = self.bodies[id.0].children.clone();
        for child in children {
            let new_center = self.bodies[child.0].orbit_position(parent_pos, time);
            self.bodies[child.0].center = new_center;
            self.update_subtree(child, time);
        }
    }

    /// Capture an independent snapshot of every body for one frame's render
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.bodies)
    }
}
