//! Land/water classification
//!
//! Verdicts are memoized per web-mercator tile at a fixed zoom. An uncached
//! tile goes through a two-step chain:
//!
//! 1. Pixel sampling of the tile image ([`pixel::PixelSampler`])
//! 2. Reverse geocoding of the point ([`geocode::ReverseGeocoder`])
//!
//! Each step runs at most once per tile. If neither produces a verdict the
//! tile is recorded as water: an unknown point is never accepted as land.

pub mod cache;
pub mod geocode;
pub mod pixel;
pub mod transport;

use crate::config::ClassifierConfig;
use crate::coord::tile::{to_tile, TileKey};
use crate::coord::Coordinates;
use crate::error::Result;
use cache::LandCache;
use geocode::ReverseGeocoder;
use pixel::PixelSampler;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use transport::{ReqwestTransport, Transport};

/// Outcome of classifying a point or tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Land,
    Water,
}

impl Verdict {
    pub fn is_land(self) -> bool {
        self == Self::Land
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Land => write!(f, "land"),
            Self::Water => write!(f, "water"),
        }
    }
}

/// Trait for land/water classifiers
///
/// Classification never fails from the caller's point of view; backends
/// resolve their own errors to a verdict.
pub trait LandClassifier: Send + Sync {
    /// Whether the point lies on land
    fn is_land(&self, coords: Coordinates) -> impl Future<Output = bool> + Send;
}

/// Where a classification currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TrySampling,
    TryGeocode,
    ConservativeWater,
}

/// Tile-memoized classifier with pixel sampling and geocoding fallback
#[derive(Debug)]
pub struct TileClassifier<T> {
    zoom: u8,
    cache: Arc<LandCache>,
    sampler: Option<PixelSampler<T>>,
    geocoder: ReverseGeocoder<T>,
}

impl<T: Transport + Clone> TileClassifier<T> {
    /// Create a classifier sharing `cache`
    ///
    /// With `pixel_sampling` disabled the chain starts at the geocoder.
    /// Fails if the settings cannot address real tiles.
    pub fn new(settings: &ClassifierConfig, cache: Arc<LandCache>, transport: T) -> Result<Self> {
        settings.validate()?;

        let sampler = settings
            .pixel_sampling
            .then(|| PixelSampler::new(transport.clone(), settings.tile_url.clone()));

        let geocoder = ReverseGeocoder::new(
            transport,
            settings.geocode_url.clone(),
            settings.geocode_zoom,
            settings.language.clone(),
        );

        Ok(Self {
            zoom: settings.zoom,
            cache,
            sampler,
            geocoder,
        })
    }
}

impl TileClassifier<ReqwestTransport> {
    /// Create a classifier that talks to the configured HTTP services
    pub fn from_config(settings: &ClassifierConfig, cache: Arc<LandCache>) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(settings.timeout_secs))?;
        Self::new(settings, cache, transport)
    }
}

impl<T> TileClassifier<T> {
    /// The cache this classifier reads and fills
    pub fn cache(&self) -> &Arc<LandCache> {
        &self.cache
    }

    /// Zoom level of classification tiles
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Whether pixel sampling is part of the chain
    pub fn pixel_sampling(&self) -> bool {
        self.sampler.is_some()
    }

    /// Tile a point is classified under
    pub fn tile_for(&self, coords: Coordinates) -> TileKey {
        to_tile(coords.lat, coords.lng, self.zoom)
    }
}

impl<T: Transport> TileClassifier<T> {
    /// Classify a tile or point, consulting and filling the cache
    pub async fn classify(&self, coords: Coordinates) -> Verdict {
        let key = self.tile_for(coords);

        if let Some(verdict) = self.cache.get(&key) {
            debug!(tile = %key, %verdict, "Tile verdict cached");
            return verdict;
        }

        let verdict = self.run_chain(coords, key).await;
        self.cache.insert(key, verdict)
    }

    async fn run_chain(&self, coords: Coordinates, key: TileKey) -> Verdict {
        let mut stage = Stage::TrySampling;

        loop {
            stage = match stage {
                Stage::TrySampling => match &self.sampler {
                    Some(sampler) => match sampler.classify(key).await {
                        Ok(verdict) => return verdict,
                        Err(e) => {
                            warn!(tile = %key, error = %e, "Pixel sampling failed, falling back to geocoding");
                            Stage::TryGeocode
                        }
                    },
                    None => Stage::TryGeocode,
                },
                Stage::TryGeocode => match self.geocoder.classify(coords).await {
                    Ok(verdict) => return verdict,
                    Err(e) => {
                        warn!(tile = %key, error = %e, "Reverse geocoding failed, treating tile as water");
                        Stage::ConservativeWater
                    }
                },
                Stage::ConservativeWater => return Verdict::Water,
            };
        }
    }
}

impl<T: Transport> LandClassifier for TileClassifier<T> {
    async fn is_land(&self, coords: Coordinates) -> bool {
        self.classify(coords).await.is_land()
    }
}
