//! Configuration system
//!
//! Scene descriptions and per-run render settings are loaded from RON or
//! TOML files. The raw values use the authoring units of the scene editor
//! (pixel-space positions, 0-255 colors); conversion into world units
//! happens when the scene graph is built.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Semantic validation error
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Per-run render settings
///
/// Duration and frame rate together determine how many frame jobs the
/// animation driver schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Simulated video length in seconds
    pub duration_secs: u32,
    /// Frames per simulated second
    pub frame_rate: u32,
    /// Output raster width in pixels
    pub width: u32,
    /// Output raster height in pixels
    pub height: u32,
    /// Directory receiving frames, the frame log, and the assembled video
    pub output_dir: String,
}

impl RenderSettings {
    /// Create settings with the given duration and frame rate
    pub fn new(duration_secs: u32, frame_rate: u32) -> Self {
        Self {
            duration_secs,
            frame_rate,
            ..Default::default()
        }
    }

    /// Set the output resolution
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Total number of frames scheduled for this run
    pub fn total_frames(&self) -> u32 {
        self.duration_secs * self.frame_rate
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::Validation("frame rate must be at least 1".into()));
        }
        if self.duration_secs == 0 {
            return Err(ConfigError::Validation("duration must be at least 1 second".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            duration_secs: 2,
            frame_rate: 10,
            width: 640,
            height: 480,
            output_dir: "output".to_string(),
        }
    }
}

/// One sphere entry in the scene description
///
/// Positions are in the editor's pixel space, colors are 0-255 per channel,
/// and radius/rotation speed are in configured units; the scene builder maps
/// everything into world units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Unique body name; parents are referenced by name
    pub name: String,
    /// Horizontal position in pixel space
    pub position_x: f32,
    /// Vertical position in pixel space
    pub position_y: f32,
    /// Surface color, 0-255 per channel
    pub color: [f32; 3],
    /// Radius in configured units
    pub radius: f32,
    /// Orbital angular speed in configured units
    pub rotation_speed: f32,
    /// Whether this body is a root (has no parent)
    pub root: bool,
    /// Parent body name; required for non-root bodies
    #[serde(default)]
    pub parent: Option<String>,
}

/// Complete scene configuration: settings plus body list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Per-run render settings
    pub settings: RenderSettings,
    /// The bodies making up the solar system
    pub bodies: Vec<BodyConfig>,
}

impl SceneConfig {
    /// Validate settings and body list
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings.validate()?;
        if self.bodies.is_empty() {
            return Err(ConfigError::Validation("scene has no bodies".into()));
        }
        Ok(())
    }
}

impl Config for SceneConfig {}
