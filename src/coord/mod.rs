//! Coordinates, placed points and viewport bounds
//!
//! This module handles:
//! - Great-circle distance between coordinates
//! - Uniform sampling inside a (possibly antimeridian-wrapping) viewport
//! - Web-mercator tile projection

pub mod geodesy;
pub mod sampler;
pub mod tile;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// A placed tree marker
///
/// Identity is the `id`: two points at the same coordinates with different
/// ids are distinct trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point with an explicit id
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }

    /// Create a point with a fresh UUID
    pub fn with_random_id(coords: Coordinates) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), coords.lat, coords.lng)
    }

    /// The point's position
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A map viewport rectangle
///
/// `west > east` is valid and means the rectangle crosses the antimeridian:
/// it spans `[west, 180]` and `[-180, east]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl Bounds {
    /// Create new bounds
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }

    /// The whole mapped world
    pub fn world() -> Self {
        Self::new(-90.0, 90.0, -180.0, 180.0)
    }

    /// Whether the rectangle crosses the antimeridian
    pub fn wraps(&self) -> bool {
        self.west > self.east
    }

    /// Check whether a coordinate lies inside the rectangle
    pub fn contains(&self, coords: Coordinates) -> bool {
        let lat_ok = coords.lat >= self.south && coords.lat <= self.north;
        let lng_ok = if self.wraps() {
            coords.lng >= self.west || coords.lng <= self.east
        } else {
            coords.lng >= self.west && coords.lng <= self.east
        };
        lat_ok && lng_ok
    }

    /// Validate ranges and latitude ordering
    pub fn validate(&self) -> Result<()> {
        let values = [self.south, self.north, self.west, self.east];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidBounds("Bounds must be finite".to_string()));
        }
        for lat in [self.south, self.north] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(Error::InvalidBounds(format!(
                    "Latitude {} is out of range [-90, 90]",
                    lat
                )));
            }
        }
        for lng in [self.west, self.east] {
            if !(-180.0..=180.0).contains(&lng) {
                return Err(Error::InvalidBounds(format!(
                    "Longitude {} is out of range [-180, 180]",
                    lng
                )));
            }
        }
        if self.south > self.north {
            return Err(Error::InvalidBounds(format!(
                "South {} is north of north {}",
                self.south, self.north
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_inverted_latitude_rejected() {
        let bounds = Bounds::new(10.0, -10.0, 0.0, 20.0);
        assert!(matches!(bounds.validate(), Err(Error::InvalidBounds(_))));
    }

    #[test]
    fn test_wrapping_bounds_are_valid() {
        let bounds = Bounds::new(-10.0, 10.0, 170.0, -170.0);
        assert!(bounds.validate().is_ok());
        assert!(bounds.wraps());
        assert!(bounds.contains(Coordinates::new(0.0, 175.0)));
        assert!(bounds.contains(Coordinates::new(0.0, -175.0)));
        assert!(!bounds.contains(Coordinates::new(0.0, 0.0)));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let bounds = Bounds::new(f64::NAN, 10.0, 0.0, 20.0);
        assert!(bounds.validate().is_err());
    }

    #[test]
    fn test_geo_point_identity_is_id() {
        let a = GeoPoint::new("a", 1.0, 2.0);
        let b = GeoPoint::new("b", 1.0, 2.0);
        assert_ne!(a, b);
        assert_eq!(a.coords(), b.coords());
    }

    #[test]
    fn test_random_ids_differ() {
        let coords = Coordinates::new(0.0, 0.0);
        let a = GeoPoint::with_random_id(coords);
        let b = GeoPoint::with_random_id(coords);
        assert_ne!(a.id, b.id);
    }
}
