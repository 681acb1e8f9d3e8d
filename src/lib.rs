//! tree-scatter: land-aware random tree placement
//!
//! Scatters simulated tree markers across a map viewport. Points are drawn
//! uniformly inside the viewport (including viewports that cross the
//! antimeridian), kept a minimum great-circle distance apart, and accepted
//! only when they lie on land.
//!
//! ## Features
//!
//! - Rejection sampling with a bounded attempt budget
//! - Land/water classification from map tile pixels, memoized per tile
//! - Reverse-geocoding fallback when tiles are unavailable
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tree_scatter::config::Config;
//! use tree_scatter::coord::Bounds;
//! use tree_scatter::land::{cache::LandCache, TileClassifier};
//! use tree_scatter::placement::{PlacementEngine, PlacementRequest};
//! use tree_scatter::random::pseudo::ThreadRandom;
//!
//! # async fn demo() -> tree_scatter::Result<()> {
//! let config = Config::default();
//! let classifier = TileClassifier::from_config(&config.classifier, Arc::new(LandCache::new()))?;
//! let rng = ThreadRandom::new();
//!
//! // 20 trees over western Europe, at least 50 km apart
//! let request = PlacementRequest::new(Some(Bounds::new(36.0, 60.0, -10.0, 20.0)), 20, 50_000.0);
//! let result = PlacementEngine::new(&classifier, &rng).place(&request).await?;
//! println!("Placed {} trees in {} attempts", result.placed.len(), result.attempts_used);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod land;
pub mod placement;
pub mod random;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Bounds, Coordinates, GeoPoint};
pub use error::{Error, Result};
pub use land::{LandClassifier, Verdict};
pub use placement::{PlacementEngine, PlacementRequest, PlacementResult};
