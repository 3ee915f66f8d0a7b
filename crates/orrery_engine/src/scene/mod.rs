//! Scene management
//!
//! The scene is a forest of spheres: planets orbit their parents, moons
//! orbit planets, and so on. The live graph is mutated by the animation
//! driver; render jobs only ever see immutable per-frame snapshots.
//!
//! ```text
//! SceneConfig (authoring units)
//!      ↓  build_scene
//! SceneGraph (live, animated)
//!      ↓  snapshot, once per frame
//! SceneSnapshot (immutable, owned by one render job)
//! ```

mod body;
mod builder;
mod graph;
mod snapshot;

pub use body::CelestialBody;
pub use builder::build_scene;
pub use graph::{BodyId, SceneError, SceneGraph};
pub use snapshot::SceneSnapshot;
