//! Great-circle distance

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::Coordinates;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// Symmetric, and zero for identical coordinates.
pub fn haversine_meters(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Check whether `candidate` keeps at least `min_meters` from every point
pub fn is_far_from_all<'a>(
    candidate: Coordinates,
    points: impl IntoIterator<Item = &'a Coordinates>,
    min_meters: f64,
) -> bool {
    points
        .into_iter()
        .all(|p| haversine_meters(candidate, *p) >= min_meters)
}
