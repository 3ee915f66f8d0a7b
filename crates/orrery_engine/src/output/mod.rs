//! Output management
//!
//! Everything that leaves the renderer goes through here: the output
//! directory, per-frame image files, the frame log report, and the final
//! ffmpeg video assembly.

mod frame_log;
mod image_writer;
mod video;

pub use frame_log::FrameLog;
pub use image_writer::{frame_path, write_frame, ImageFormat};
pub use video::assemble_video;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::RenderSettings;

/// Output-side errors; all fatal, none downgraded to a partial result
#[derive(Error, Debug)]
pub enum OutputError {
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("encode error: {0}")]
    Encode(String),

    /// ffmpeg could not be run or exited with a failure status
    #[error("video assembly failed: {0}")]
    Ffmpeg(String),
}

/// Create the output directory and clear leftovers from a previous run
///
/// Removes any stale frame images, the assembled video, and the frame log
/// so a rerun never mixes old and new frames. Returns the directory path.
pub fn prepare_output_dir(settings: &RenderSettings) -> Result<PathBuf, OutputError> {
    let dir = PathBuf::from(&settings.output_dir);
    fs::create_dir_all(&dir)?;

    remove_if_exists(&dir.join("frame_log.txt"))?;
    remove_if_exists(&dir.join("video.mp4"))?;

    for format in [ImageFormat::Ppm, ImageFormat::Png] {
        let mut index = 0;
        loop {
            let frame = frame_path(&dir, index, format);
            if !frame.exists() {
                break;
            }
            fs::remove_file(frame)?;
            index += 1;
        }
    }

    log::info!("output directory ready: {}", dir.display());
    Ok(dir)
}

fn remove_if_exists(path: &Path) -> Result<(), OutputError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(OutputError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings(tag: &str) -> RenderSettings {
        let dir = std::env::temp_dir().join(format!("orrery_output_{}_{tag}", std::process::id()));
        RenderSettings::new(1, 1).with_output_dir(dir.to_string_lossy())
    }

    #[test]
    fn test_prepare_creates_directory() {
        let settings = temp_settings("create");
        let dir = prepare_output_dir(&settings).unwrap();
        assert!(dir.is_dir());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_prepare_clears_stale_frames() {
        let settings = temp_settings("stale");
        let dir = prepare_output_dir(&settings).unwrap();

        for index in 0..3 {
            fs::write(frame_path(&dir, index, ImageFormat::Ppm), b"stale").unwrap();
        }
        fs::write(dir.join("video.mp4"), b"stale").unwrap();

        let dir = prepare_output_dir(&settings).unwrap();
        assert!(!frame_path(&dir, 0, ImageFormat::Ppm).exists());
        assert!(!frame_path(&dir, 2, ImageFormat::Ppm).exists());
        assert!(!dir.join("video.mp4").exists());
        fs::remove_dir_all(dir).ok();
    }
}
