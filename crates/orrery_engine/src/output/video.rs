//! Video assembly
//!
//! Hands the rendered PPM sequence to an external `ffmpeg` process. The
//! engine only guarantees the gap-free frame sequence; encoding choices
//! live in the argument list below.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::RenderSettings;
use crate::output::OutputError;

fn ffmpeg_args(dir: &Path, settings: &RenderSettings) -> Vec<String> {
    vec![
        "-r".to_string(),
        settings.frame_rate.to_string(),
        "-f".to_string(),
        "image2".to_string(),
        "-s".to_string(),
        format!("{}x{}", settings.width, settings.height),
        "-i".to_string(),
        dir.join("spheres%d.ppm").to_string_lossy().into_owned(),
        "-vcodec".to_string(),
        "libx264".to_string(),
        "-crf".to_string(),
        "25".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        dir.join("video.mp4").to_string_lossy().into_owned(),
    ]
}

/// Assemble the rendered frames into `video.mp4`, returning its path
pub fn assemble_video(dir: &Path, settings: &RenderSettings) -> Result<PathBuf, OutputError> {
    let args = ffmpeg_args(dir, settings);
    log::info!("assembling video: ffmpeg {}", args.join(" "));

    let status = Command::new("ffmpeg")
        .args(&args)
        .status()
        .map_err(|e| OutputError::Ffmpeg(format!("could not run ffmpeg: {e}")))?;

    if !status.success() {
        return Err(OutputError::Ffmpeg(format!("ffmpeg exited with {status}")));
    }
    Ok(dir.join("video.mp4"))
}
