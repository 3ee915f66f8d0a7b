//! Frame log report
//!
//! A plain-text report written alongside the frames: the run settings, how
//! long the scene import took, one line per rendered frame, and the total
//! render wall time. Render jobs on different workers append concurrently,
//! so the writer sits behind a mutex.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::config::RenderSettings;
use crate::output::OutputError;

const SEPARATOR: &str = "===================================================================";

/// Shared, append-only frame log for one run
pub struct FrameLog {
    writer: Mutex<BufWriter<File>>,
}

impl FrameLog {
    /// Create `frame_log.txt` in the output directory and write the header
    pub fn create(dir: &Path, settings: &RenderSettings) -> Result<Self, OutputError> {
        let file = File::create(dir.join("frame_log.txt"))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "Application Configuration Settings:")?;
        writeln!(writer, "Video Length:\t\t{} seconds", settings.duration_secs)?;
        writeln!(writer, "Frames Per Second:\t{}", settings.frame_rate)?;
        writeln!(writer, "Resolution:\t\t{}x{}", settings.width, settings.height)?;
        writeln!(writer)?;
        writeln!(writer, "{SEPARATOR}")?;
        writeln!(writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
        })
    }

    /// Record how long the scene import took
    pub fn record_import(&self, elapsed: Duration) -> Result<(), OutputError> {
        let secs = elapsed.as_secs_f64();
        let mut writer = self.writer.lock().unwrap();
        writeln!(
            writer,
            "Scene Import Run Time:\t{secs:.6} seconds | {:.6} minutes",
            secs / 60.0
        )?;
        writeln!(writer)?;
        writeln!(writer, "{SEPARATOR}")?;
        Ok(())
    }

    /// Record one completed frame
    ///
    /// Called from worker threads; frame lines appear in completion order,
    /// which is not necessarily frame order.
    pub fn record_frame(&self, index: u32, total: u32, elapsed: Duration) -> Result<(), OutputError> {
        let completed = index + 1;
        let mut writer = self.writer.lock().unwrap();
        writeln!(
            writer,
            "Frame {completed}: {:.6}\t| Render Completion: {completed}/{total}",
            elapsed.as_secs_f64()
        )?;
        Ok(())
    }

    /// Write the footer with the total render wall time and flush
    pub fn finish(&self, render_elapsed: Duration) -> Result<(), OutputError> {
        let secs = render_elapsed.as_secs_f64();
        let mut writer = self.writer.lock().unwrap();
        writeln!(writer)?;
        writeln!(writer, "{SEPARATOR}")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "Render Run Time:\t{secs:.6} seconds | {:.6} minutes",
            secs / 60.0
        )?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("orrery_log_{}_{tag}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_log_contains_header_frames_and_footer() {
        let dir = temp_dir("full");
        let settings = RenderSettings::new(2, 10).with_resolution(640, 480);

        let frame_log = FrameLog::create(&dir, &settings).unwrap();
        frame_log.record_import(Duration::from_millis(25)).unwrap();
        frame_log.record_frame(0, 20, Duration::from_millis(40)).unwrap();
        frame_log.record_frame(1, 20, Duration::from_millis(41)).unwrap();
        frame_log.finish(Duration::from_millis(90)).unwrap();

        let contents = fs::read_to_string(dir.join("frame_log.txt")).unwrap();
        assert!(contents.contains("Video Length:\t\t2 seconds"));
        assert!(contents.contains("Resolution:\t\t640x480"));
        assert!(contents.contains("Scene Import Run Time:"));
        assert!(contents.contains("Render Completion: 1/20"));
        assert!(contents.contains("Render Completion: 2/20"));
        assert!(contents.contains("Render Run Time:"));
        fs::remove_dir_all(dir).ok();
    }
}
