//! Tile pixel sampling
//!
//! Fetches the raster tile under a point and votes on five pixels: the tile
//! center and one pixel a fixed distance above, below, left and right of it.
//! A pixel is water-like when it is clearly blue; the tile counts as land if
//! any single vote is land-like. Coastal tiles are mixed-color, so the bar is
//! kept low to avoid rejecting land near the shore.

use crate::coord::tile::{tile_url, TileKey};
use crate::error::{Error, Result};
use crate::land::transport::Transport;
use crate::land::Verdict;
use image::RgbImage;
use tracing::debug;

/// Distance in pixels from the tile center to the four outer samples
pub const SAMPLE_OFFSET_PX: u32 = 20;

/// Minimum blue channel value for a water-like pixel
const WATER_MIN_BLUE: i32 = 140;

/// How far blue must exceed red for a water-like pixel
const WATER_BLUE_OVER_RED: i32 = 30;

/// How far blue must exceed green for a water-like pixel
const WATER_BLUE_OVER_GREEN: i32 = 20;

/// Classifies tiles by sampling their pixels
#[derive(Debug, Clone)]
pub struct PixelSampler<T> {
    transport: T,
    url_template: String,
}

impl<T: Transport> PixelSampler<T> {
    /// Create a sampler fetching tiles from a `{z}/{x}/{y}` URL template
    pub fn new(transport: T, url_template: impl Into<String>) -> Self {
        Self {
            transport,
            url_template: url_template.into(),
        }
    }

    /// Fetch, decode and vote on the tile at `key`
    ///
    /// Fetch and decode failures are returned as errors so the caller can
    /// fall through to another strategy.
    pub async fn classify(&self, key: TileKey) -> Result<Verdict> {
        let url = tile_url(&self.url_template, key);
        let bytes = self.transport.get(&url).await?;
        let tile = decode_tile(&bytes)?;
        let verdict = classify_image(&tile);

        debug!(tile = %key, ?verdict, "Classified tile by pixel sampling");
        Ok(verdict)
    }
}

/// Decode tile bytes (PNG or JPEG) to RGB
pub fn decode_tile(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let rgb = img.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(Error::Decode("Tile image is empty".to_string()));
    }
    Ok(rgb)
}

/// Vote on the five sample pixels of a decoded tile
pub fn classify_image(tile: &RgbImage) -> Verdict {
    let land_votes = sample_positions(tile.width(), tile.height())
        .iter()
        .filter(|&&(x, y)| !is_water_pixel(tile.get_pixel(x, y).0))
        .count();

    if land_votes >= 1 {
        Verdict::Land
    } else {
        Verdict::Water
    }
}

/// Whether an RGB pixel looks like water
pub fn is_water_pixel([r, g, b]: [u8; 3]) -> bool {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    b > WATER_MIN_BLUE && b > r + WATER_BLUE_OVER_RED && b > g + WATER_BLUE_OVER_GREEN
}

/// Center plus up, down, left and right offsets, clamped to the image
///
/// Both dimensions must be non-zero.
pub fn sample_positions(width: u32, height: u32) -> [(u32, u32); 5] {
    let (cx, cy) = (width / 2, height / 2);
    let d = SAMPLE_OFFSET_PX;

    [
        (cx, cy),
        (cx, cy.saturating_sub(d)),
        (cx, (cy + d).min(height - 1)),
        (cx.saturating_sub(d), cy),
        ((cx + d).min(width - 1), cy),
    ]
}
