//! Centralized constants for the tree-scatter crate
//!
//! Values shared by several modules live here so the geodesy, projection and
//! classifier code agree on them.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters used by the haversine formula
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Latitude band used when no viewport is supplied
    pub const FALLBACK_MAX_LAT: f64 = 85.0;

    /// Web-mercator latitude limit; tiles do not exist beyond it
    pub const MERCATOR_MAX_LAT: f64 = 85.051_128_78;

    /// Deepest web-mercator zoom served by raster tile providers
    pub const MAX_TILE_ZOOM: u8 = 22;
}

/// External service endpoints
pub mod api {
    /// OpenStreetMap standard raster tiles
    pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// User agent sent with every request (Nominatim rejects anonymous clients)
    pub const USER_AGENT: &str = concat!("tree-scatter/", env!("CARGO_PKG_VERSION"));
}

/// Placement limits
pub mod placement {
    /// Attempt budget floor
    pub const MIN_ATTEMPTS: usize = 1000;

    /// Attempts granted per requested point
    pub const ATTEMPTS_PER_POINT: usize = 800;
}
