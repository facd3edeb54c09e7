//! Window configuration
//!
//! [`WindowConfig`] carries the construction parameters of a
//! [`Window`](crate::Window). It can be built in code or loaded from a TOML or
//! RON file through the [`Config`] trait; the format is picked from the file
//! extension.

use std::path::Path;

use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Serialize};

/// Default window width in pixels
pub const DEFAULT_WIDTH: u32 = 1280;

/// Default window height in pixels
pub const DEFAULT_HEIGHT: u32 = 720;

/// Default swap interval: one buffer swap per display refresh
pub const DEFAULT_SWAP_INTERVAL: u32 = 1;

/// Configuration trait
pub trait Config: Serialize + DeserializeOwned {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match Format::from_path(path)? {
            Format::Toml => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Format::Ron => {
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::from_path(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
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

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Construction parameters for a window
///
/// `title` has no default and must be present in config files; every other
/// field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Client area width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Client area height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
    /// Window title
    pub title: String,
    /// Display refreshes to wait between buffer swaps (0 disables vsync)
    #[serde(default = "default_swap_interval")]
    pub swap_interval: u32,
    /// Treat a held Escape key as a close request
    #[serde(default = "default_close_on_escape")]
    pub close_on_escape: bool,
}

const fn default_width() -> u32 {
    DEFAULT_WIDTH
}

const fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

const fn default_swap_interval() -> u32 {
    DEFAULT_SWAP_INTERVAL
}

const fn default_close_on_escape() -> bool {
    true
}

impl WindowConfig {
    /// Create a 1280x720 vsynced configuration with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: title.into(),
            swap_interval: DEFAULT_SWAP_INTERVAL,
            close_on_escape: true,
        }
    }

    /// Set the client area size
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the swap interval
    #[must_use]
    pub const fn with_swap_interval(mut self, swap_interval: u32) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Enable or disable Escape-to-close
    #[must_use]
    pub const fn with_close_on_escape(mut self, close_on_escape: bool) -> Self {
        self.close_on_escape = close_on_escape;
        self
    }

    /// Check that the size is drawable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Config for WindowConfig {}
