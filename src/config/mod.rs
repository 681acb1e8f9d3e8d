//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/tree-scatter/config.toml

pub mod defaults;

use crate::constants::geo::MAX_TILE_ZOOM;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Placement defaults
    #[serde(default)]
    pub placement: PlacementConfig,

    /// Land/water classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Placement defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Trees per run
    #[serde(default = "default_count")]
    pub count: usize,

    /// Minimum spacing between trees in meters
    #[serde(default = "default_min_distance")]
    pub min_distance_meters: f64,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Land/water classifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Zoom of classification tiles
    #[serde(default = "default_classifier_zoom")]
    pub zoom: u8,

    /// Tile image URL template with {z}, {x} and {y}
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Classify by tile pixels before falling back to geocoding
    #[serde(default = "default_pixel_sampling")]
    pub pixel_sampling: bool,

    /// Reverse geocoding base URL
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    /// Reverse geocoding detail level
    #[serde(default = "default_geocode_zoom")]
    pub geocode_zoom: u8,

    /// Language hint for reverse geocoding
    #[serde(default = "default_language")]
    pub language: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_count() -> usize {
    DEFAULT_COUNT
}
fn default_min_distance() -> f64 {
    DEFAULT_MIN_DISTANCE_METERS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_classifier_zoom() -> u8 {
    DEFAULT_CLASSIFIER_ZOOM
}
fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}
fn default_pixel_sampling() -> bool {
    true
}
fn default_geocode_url() -> String {
    DEFAULT_GEOCODE_URL.to_string()
}
fn default_geocode_zoom() -> u8 {
    DEFAULT_GEOCODE_ZOOM
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            min_distance_meters: default_min_distance(),
            format: default_format(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            zoom: default_classifier_zoom(),
            tile_url: default_tile_url(),
            pixel_sampling: default_pixel_sampling(),
            geocode_url: default_geocode_url(),
            geocode_zoom: default_geocode_zoom(),
            language: default_language(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ClassifierConfig {
    /// Reject settings that cannot address real tiles
    pub fn validate(&self) -> Result<()> {
        if self.zoom > MAX_TILE_ZOOM {
            return Err(Error::Config(format!(
                "Classifier zoom must be between 0 and {}, got {}",
                MAX_TILE_ZOOM, self.zoom
            )));
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            Self::from_toml(&content)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Parse and validate configuration file content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        config.classifier.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["placement", "count"] => Some(self.placement.count.to_string()),
            ["placement", "min_distance_meters"] => {
                Some(self.placement.min_distance_meters.to_string())
            }
            ["placement", "format"] => Some(self.placement.format.clone()),

            ["classifier", "zoom"] => Some(self.classifier.zoom.to_string()),
            ["classifier", "tile_url"] => Some(self.classifier.tile_url.clone()),
            ["classifier", "pixel_sampling"] => Some(self.classifier.pixel_sampling.to_string()),
            ["classifier", "geocode_url"] => Some(self.classifier.geocode_url.clone()),
            ["classifier", "geocode_zoom"] => Some(self.classifier.geocode_zoom.to_string()),
            ["classifier", "language"] => Some(self.classifier.language.clone()),
            ["classifier", "timeout_secs"] => Some(self.classifier.timeout_secs.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["placement", "count"] => {
                self.placement.count = parse_value(key, value)?;
            }
            ["placement", "min_distance_meters"] => {
                let meters: f64 = parse_value(key, value)?;
                if !meters.is_finite() || meters < 0.0 {
                    return Err(Error::Config(format!(
                        "Minimum distance must be a non-negative number: {}",
                        value
                    )));
                }
                self.placement.min_distance_meters = meters;
            }
            ["placement", "format"] => {
                self.placement.format = value.to_string();
            }

            ["classifier", "zoom"] => {
                let zoom: u8 = parse_value(key, value)?;
                if zoom > MAX_TILE_ZOOM {
                    return Err(Error::Config(format!(
                        "Classifier zoom must be between 0 and {}: {}",
                        MAX_TILE_ZOOM, value
                    )));
                }
                self.classifier.zoom = zoom;
            }
            ["classifier", "tile_url"] => {
                self.classifier.tile_url = value.to_string();
            }
            ["classifier", "pixel_sampling"] => {
                self.classifier.pixel_sampling = parse_value(key, value)?;
            }
            ["classifier", "geocode_url"] => {
                self.classifier.geocode_url = value.to_string();
            }
            ["classifier", "geocode_zoom"] => {
                self.classifier.geocode_zoom = parse_value(key, value)?;
            }
            ["classifier", "language"] => {
                self.classifier.language = value.to_string();
            }
            ["classifier", "timeout_secs"] => {
                self.classifier.timeout_secs = parse_value(key, value)?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse_value(key, value)?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "placement.count",
            "placement.min_distance_meters",
            "placement.format",
            "classifier.zoom",
            "classifier.tile_url",
            "classifier.pixel_sampling",
            "classifier.geocode_url",
            "classifier.geocode_zoom",
            "classifier.language",
            "classifier.timeout_secs",
            "server.host",
            "server.port",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
