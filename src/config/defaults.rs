//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::{NOMINATIM_URL, OSM_TILE_URL};

/// Default number of trees per placement run
pub const DEFAULT_COUNT: usize = 200;

/// Default minimum spacing between trees in meters
pub const DEFAULT_MIN_DISTANCE_METERS: f64 = 50_000.0;

/// Default output format
pub const DEFAULT_FORMAT: &str = "json";

/// Zoom of classification tiles
///
/// Coarse enough to bound request volume, fine enough to resolve coastlines.
pub const DEFAULT_CLASSIFIER_ZOOM: u8 = 5;

/// Default tile image source
pub const DEFAULT_TILE_URL: &str = OSM_TILE_URL;

/// Default reverse geocoding service
pub const DEFAULT_GEOCODE_URL: &str = NOMINATIM_URL;

/// Default reverse geocoding detail level
pub const DEFAULT_GEOCODE_ZOOM: u8 = 10;

/// Default language hint for reverse geocoding
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "tree-scatter";
