//! Server shared state
//!
//! Holds configuration and the classifier whose cache outlives requests.

use crate::config::Config;
use crate::error::Result;
use crate::land::cache::LandCache;
use crate::land::transport::{ReqwestTransport, Transport};
use crate::land::TileClassifier;
use std::sync::Arc;

/// Shared state for the HTTP server
///
/// Every request gets its own placement loop; all of them share one
/// classifier and therefore one tile verdict cache.
pub struct AppState<T = ReqwestTransport> {
    /// Configuration
    pub config: Config,

    /// Classifier shared by all placement requests
    pub classifier: TileClassifier<T>,
}

impl AppState<ReqwestTransport> {
    /// Create state talking to the configured services, with an empty cache
    pub fn new(config: Config) -> Result<Self> {
        let classifier = TileClassifier::from_config(&config.classifier, Arc::new(LandCache::new()))?;
        Ok(Self::with_classifier(config, classifier))
    }
}

impl<T: Transport> AppState<T> {
    /// Create state around an existing classifier
    pub fn with_classifier(config: Config, classifier: TileClassifier<T>) -> Self {
        Self { config, classifier }
    }

    /// Number of tiles classified since startup
    pub fn cached_tiles(&self) -> usize {
        self.classifier.cache().len()
    }
}
