//! Reverse-geocoding classification (OpenStreetMap Nominatim)
//!
//! Slower than pixel sampling; the classifier only reaches it when a tile
//! cannot be sampled. Nominatim's usage policy allows at most one request
//! per second and calls made here are not throttled.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::land::transport::Transport;
use crate::land::Verdict;
use serde::Deserialize;
use tracing::debug;

/// Substrings of a place's class or type that mark it as water
const WATER_MARKERS: [&str; 4] = ["water", "ocean", "river", "lake"];

/// Reverse-geocoding response; only the classification fields matter
#[derive(Debug, Deserialize)]
struct ReversePlace {
    #[serde(default)]
    class: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Classifies points by asking a reverse geocoder what is there
#[derive(Debug, Clone)]
pub struct ReverseGeocoder<T> {
    transport: T,
    base_url: String,
    zoom: u8,
    language: String,
}

impl<T: Transport> ReverseGeocoder<T> {
    /// Create a geocoder against a Nominatim-compatible base URL
    pub fn new(transport: T, base_url: impl Into<String>, zoom: u8, language: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            zoom,
            language: language.into(),
        }
    }

    /// Build the reverse lookup URL for a point
    pub fn reverse_url(&self, coords: Coordinates) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom={}&accept-language={}",
            self.base_url.trim_end_matches('/'),
            coords.lat,
            coords.lng,
            self.zoom,
            urlencoding::encode(&self.language)
        )
    }

    /// Look the point up and classify the returned place
    pub async fn classify(&self, coords: Coordinates) -> Result<Verdict> {
        let body = self.transport.get(&self.reverse_url(coords)).await?;

        let place: ReversePlace = serde_json::from_slice(&body).map_err(|e| {
            Error::Geocoding(format!("Failed to parse reverse geocoding response: {}", e))
        })?;

        let verdict = classify_place(place.class.as_deref(), place.kind.as_deref());
        debug!(
            lat = coords.lat,
            lng = coords.lng,
            class = ?place.class,
            kind = ?place.kind,
            ?verdict,
            "Classified point by reverse geocoding"
        );
        Ok(verdict)
    }
}

/// Water if either field contains a water marker (case-insensitive)
///
/// Missing fields are not evidence of water.
pub fn classify_place(class: Option<&str>, kind: Option<&str>) -> Verdict {
    let is_water = [class, kind].into_iter().flatten().any(|field| {
        let field = field.to_lowercase();
        WATER_MARKERS.iter().any(|marker| field.contains(marker))
    });

    if is_water {
        Verdict::Water
    } else {
        Verdict::Land
    }
}
