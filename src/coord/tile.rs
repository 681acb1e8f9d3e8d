//! Web-mercator tile projection

use crate::constants::geo::MERCATOR_MAX_LAT;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Address of a raster map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileKey {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Converts geographic coordinates to the tile containing them.
///
/// `zoom` must not exceed
/// [`MAX_TILE_ZOOM`](crate::constants::geo::MAX_TILE_ZOOM); classifier
/// settings are validated against it.
///
/// Latitude is clamped to the mercator limit and indices to
/// `[0, 2^zoom - 1]`, so `lon = 180` maps to the last column rather than
/// one past it.
pub fn to_tile(lat: f64, lon: f64, zoom: u8) -> TileKey {
    let n = 2.0_f64.powi(zoom as i32);
    let max_index = n - 1.0;

    let lat = lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT);
    let lat_rad = lat * PI / 180.0;

    let x = ((lon + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();

    TileKey {
        zoom,
        x: x.clamp(0.0, max_index) as u32,
        y: y.clamp(0.0, max_index) as u32,
    }
}

/// Expand a URL template's `{z}`, `{x}` and `{y}` placeholders
pub fn tile_url(template: &str, key: TileKey) -> String {
    template
        .replace("{z}", &key.zoom.to_string())
        .replace("{x}", &key.x.to_string())
        .replace("{y}", &key.y.to_string())
}
