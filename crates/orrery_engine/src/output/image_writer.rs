//! Frame image encoding
//!
//! Framebuffers are linear float RGB; channels clamp to [0, 1] and
//! truncate to 8 bits only here. PPM is the native format of the video
//! pipeline; PNG is available for inspecting individual frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::output::OutputError;
use crate::render::Framebuffer;

/// Supported frame image encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Binary PPM (P6), consumed by the video assembler
    Ppm,
    /// PNG, for frame-by-frame inspection
    Png,
}

impl ImageFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Ppm => "ppm",
            Self::Png => "png",
        }
    }
}

/// Path of the image file for one frame index
///
/// The naming scheme is `spheres<index>.<ext>`, a deterministic, gap-free
/// sequence the video assembler patterns against.
pub fn frame_path(dir: &Path, index: u32, format: ImageFormat) -> PathBuf {
    dir.join(format!("spheres{index}.{}", format.extension()))
}

/// Encode and write one frame, returning the file path
pub fn write_frame(
    dir: &Path,
    index: u32,
    framebuffer: &Framebuffer,
    format: ImageFormat,
) -> Result<PathBuf, OutputError> {
    let path = frame_path(dir, index, format);
    match format {
        ImageFormat::Ppm => write_ppm(&path, framebuffer)?,
        ImageFormat::Png => write_png(&path, framebuffer)?,
    }
    Ok(path)
}

/// Channels clamped to [0, 1] and truncated to a byte each, row-major
fn clamped_bytes(framebuffer: &Framebuffer) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(framebuffer.pixels().len() * 3);
    for pixel in framebuffer.pixels() {
        bytes.push((pixel.x.clamp(0.0, 1.0) * 255.0) as u8);
        bytes.push((pixel.y.clamp(0.0, 1.0) * 255.0) as u8);
        bytes.push((pixel.z.clamp(0.0, 1.0) * 255.0) as u8);
    }
    bytes
}

fn write_ppm(path: &Path, framebuffer: &Framebuffer) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write!(
        writer,
        "P6\n{} {}\n255\n",
        framebuffer.width(),
        framebuffer.height()
    )?;
    writer.write_all(&clamped_bytes(framebuffer))?;
    writer.flush()?;
    Ok(())
}

fn write_png(path: &Path, framebuffer: &Framebuffer) -> Result<(), OutputError> {
    let image = image::RgbImage::from_raw(
        framebuffer.width(),
        framebuffer.height(),
        clamped_bytes(framebuffer),
    )
    .ok_or_else(|| OutputError::Encode("framebuffer size mismatch".to_string()))?;
    image
        .save(path)
        .map_err(|e| OutputError::Encode(e.to_string()))
}
