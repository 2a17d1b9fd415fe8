//! Configuration system
//!
//! [`AppConfig`] gathers the start-up settings of every subsystem. It can be
//! built in code or loaded from a `.toml` / `.ron` file through [`Config`].
//! The plain-text user options file lives in [`options`].

pub mod options;

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::{IVec2, Vec3};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

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
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
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
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Install a logger at all
    pub enabled: bool,
    /// Level filter name (`error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
    /// Files that receive a copy of every record
    pub file_names: Vec<String>,
    /// Prefix records with a timestamp
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            file_names: vec!["Acetylene.log".to_string()],
            timestamps: true,
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window size in pixels
    pub dimensions: IVec2,
    /// Window title
    pub title: String,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            dimensions: IVec2::new(800, 600),
            title: "Acetylene".to_string(),
            fullscreen: false,
        }
    }
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume in `[0, 1]`
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Clear color, RGB in `[0, 1]`
    pub background_color: Vec3,
}

/// Update loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Update units per second of wall time
    pub target_updates_per_second: f64,
    /// Cap on whole update steps per rendered frame
    pub max_updates_per_frame: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            target_updates_per_second: 60.0,
            max_updates_per_frame: 10,
        }
    }
}

/// Start-up configuration for an [`App`](crate::App)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging
    pub log: LogConfig,
    /// Window
    pub window: WindowConfig,
    /// Audio
    pub audio: AudioConfig,
    /// Renderer
    pub graphics: GraphicsConfig,
    /// Update loop
    pub physics: PhysicsConfig,
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.window.dimensions, IVec2::new(800, 600));
        assert_eq!(config.window.title, "Acetylene");
        assert_eq!(config.log.file_names, vec!["Acetylene.log".to_string()]);
        assert_eq!(config.physics.max_updates_per_frame, 10);
    }

    #[test]
    fn test_toml_round_trip_keeps_sections() {
        let mut config = AppConfig::default();
        config.window.title = "TestDriver".to_string();
        config.audio.volume = 0.25;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let parsed: AppConfig = ron::from_str("(window: (title: \"Demo\"))").unwrap();
        assert_eq!(parsed.window.title, "Demo");
        assert_eq!(parsed.window.dimensions, IVec2::new(800, 600));
        assert_eq!(parsed.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = AppConfig::default().save_to_file("config.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
