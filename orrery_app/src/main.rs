//! Solar-system renderer application
//!
//! Loads a scene description, renders every animation frame across the
//! worker pool, writes the frame log, and assembles the final video.

use std::sync::Arc;

use orrery_engine::foundation::time::Stopwatch;
use orrery_engine::output::assemble_video;
use orrery_engine::prelude::*;

const DEFAULT_SCENE_PATH: &str = "resources/scene.ron";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    orrery_engine::foundation::logging::init();

    let scene_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCENE_PATH.to_string());
    log::info!("loading scene from {scene_path}");

    let config = SceneConfig::load_from_file(&scene_path)?;
    config.validate()?;

    let output_dir = output::prepare_output_dir(&config.settings)?;
    let frame_log = Arc::new(FrameLog::create(&output_dir, &config.settings)?);

    // Structural scene errors (unknown parents, cycles) abort here, before
    // any frame job exists.
    let import_watch = Stopwatch::start_new();
    let mut scene = build_scene(&config)?;
    frame_log.record_import(import_watch.elapsed())?;

    let render_watch = Stopwatch::start_new();
    let mut scheduler = JobScheduler::new();
    let driver = AnimationDriver::new(config.settings.clone(), &output_dir);
    let submitted = driver.run(&mut scene, &scheduler, &frame_log)?;
    scheduler.join_all()?;

    frame_log.finish(render_watch.elapsed())?;
    log::info!(
        "rendered {submitted} frames in {:.3}s",
        render_watch.elapsed().as_secs_f64()
    );

    match assemble_video(&output_dir, &config.settings) {
        Ok(video) => log::info!("video written to {}", video.display()),
        Err(e) => log::warn!("{e}; frames are still available in {}", output_dir.display()),
    }

    Ok(())
}
