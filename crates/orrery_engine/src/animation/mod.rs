//! Animation driving
//!
//! Walks simulated time frame by frame: nudges the roots, lets every
//! orbit recompute, captures an immutable snapshot, and submits one render
//! job per frame to the scheduler. Jobs complete in whatever order the
//! workers reach them; the snapshot makes that safe.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::RenderSettings;
use crate::foundation::time::Stopwatch;
use crate::jobs::{JobScheduler, SchedulerError};
use crate::output::{write_frame, FrameLog, ImageFormat};
use crate::render::render_frame;
use crate::scene::SceneGraph;

/// Per-frame drift applied to every root body: depth and each surface
/// color channel decrease by this amount each frame. The decrement is per
/// frame, not per simulated second, so a higher frame rate fades faster.
const ROOT_FADE_STEP: f32 = 0.01;

/// Drives the per-frame animation loop and submits render jobs
pub struct AnimationDriver {
    settings: RenderSettings,
    output_dir: PathBuf,
    format: ImageFormat,
}

impl AnimationDriver {
    /// Create a driver rendering into the given output directory
    pub fn new(settings: RenderSettings, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            output_dir: output_dir.into(),
            format: ImageFormat::Ppm,
        }
    }

    /// Use a different frame image format (PPM by default)
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Advance the scene through every frame and submit one render job each
    ///
    /// Returns the number of submitted jobs, which is exactly
    /// `settings.total_frames()`. Submission is cheap; rendering happens on
    /// the scheduler's workers, and [`JobScheduler::join_all`] is the point
    /// where completion (or a job failure) is observed.
    pub fn run(
        &self,
        scene: &mut SceneGraph,
        scheduler: &JobScheduler,
        frame_log: &Arc<FrameLog>,
    ) -> Result<u32, SchedulerError> {
        let total_frames = self.settings.total_frames();
        let frame_rate = self.settings.frame_rate as f32;

        for index in 0..total_frames {
            let time = index as f32 / frame_rate;

            for root in scene.roots() {
                let body = scene.get_mut(root);
                body.center.z -= ROOT_FADE_STEP;
                body.surface_color = body.surface_color.add_scalar(-ROOT_FADE_STEP);
            }
            scene.update_orbits(time);

            let snapshot = scene.snapshot();
            let width = self.settings.width;
            let height = self.settings.height;
            let dir = self.output_dir.clone();
            let format = self.format;
            let frame_log = Arc::clone(frame_log);

            scheduler.submit(move || {
                let stopwatch = Stopwatch::start_new();

                let framebuffer = render_frame(&snapshot, width, height);
                write_frame(&dir, index, &framebuffer, format)?;

                let elapsed = stopwatch.elapsed();
                frame_log.record_frame(index, total_frames, elapsed)?;
                log::info!(
                    "frame {}/{} rendered in {:.3}s",
                    index + 1,
                    total_frames,
                    elapsed.as_secs_f64()
                );
                Ok(())
            })?;
        }

        log::info!("submitted {total_frames} frame jobs");
        Ok(total_frames)
    }

    /// The output directory frames are written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
