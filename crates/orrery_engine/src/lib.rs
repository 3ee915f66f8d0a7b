//! # Orrery Engine
//!
//! A headless renderer that animates a hierarchical "solar system" of
//! spheres and ray traces each animation frame into a still image.
//!
//! ## Features
//!
//! - **Recursive Ray Tracing**: Reflection, refraction, and shadow rays
//! - **Hierarchical Scene Graph**: Bodies orbit their parents, parents orbit theirs
//! - **Frame-Level Parallelism**: A fixed worker pool renders frames concurrently
//! - **Snapshot Isolation**: Every frame job owns an independent scene copy
//! - **Configurable Scenes**: RON or TOML scene descriptions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orrery_engine::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SceneConfig::load_from_file("resources/scene.ron")?;
//!     let output_dir = output::prepare_output_dir(&config.settings)?;
//!
//!     let mut scene = build_scene(&config)?;
//!     let frame_log = Arc::new(FrameLog::create(&output_dir, &config.settings)?);
//!
//!     let mut scheduler = JobScheduler::new();
//!     let driver = AnimationDriver::new(config.settings.clone(), &output_dir);
//!     driver.run(&mut scene, &scheduler, &frame_log)?;
//!     scheduler.join_all()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod render;
pub mod jobs;
pub mod animation;
pub mod output;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::AnimationDriver,
        config::{Config, ConfigError, RenderSettings, SceneConfig},
        foundation::math::{Color, Vec3},
        jobs::{JobScheduler, SchedulerError},
        output::{self, FrameLog, OutputError},
        render::{render_frame, trace, Framebuffer},
        scene::{build_scene, BodyId, CelestialBody, SceneError, SceneGraph, SceneSnapshot},
    };
}
