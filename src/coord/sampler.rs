//! Uniform sampling inside a viewport
//!
//! Latitude is drawn uniformly between south and north. Longitude is drawn
//! uniformly over the visible span, which for an antimeridian-crossing
//! viewport is the union of `[west, 180]` and `[-180, east]`. Each segment is
//! weighted by its angular width so the wrapped rectangle stays uniform.
//!
//! Sampling is uniform in degrees, not in area; that matches what the viewer
//! sees on a web-mercator map closely enough for scattering markers.

use crate::constants::geo::FALLBACK_MAX_LAT;
use crate::coord::{Bounds, Coordinates};
use crate::error::Result;
use crate::random::RandomSource;

/// Draw a uniform random coordinate inside `bounds`
///
/// With no viewport, latitude is drawn from `[-85, 85]` (away from the
/// poles, where tile projection degenerates) and longitude from the full
/// `[-180, 180]`.
pub fn sample_uniform(bounds: Option<&Bounds>, rng: &dyn RandomSource) -> Result<Coordinates> {
    let floats = rng.floats(2)?;
    let u_lat = floats[0];
    let u_lng = floats[1];

    let coords = match bounds {
        Some(b) => Coordinates::new(lerp(b.south, b.north, u_lat), sample_longitude(b, u_lng)),
        None => Coordinates::new(
            lerp(-FALLBACK_MAX_LAT, FALLBACK_MAX_LAT, u_lat),
            lerp(-180.0, 180.0, u_lng),
        ),
    };

    Ok(coords)
}

/// Map a unit float onto the longitude span of `bounds`
fn sample_longitude(bounds: &Bounds, u: f64) -> f64 {
    if !bounds.wraps() {
        return lerp(bounds.west, bounds.east, u);
    }

    let west_span = 180.0 - bounds.west;
    let east_span = bounds.east + 180.0;
    let r = u * (west_span + east_span);

    if r < west_span {
        bounds.west + r
    } else {
        -180.0 + (r - west_span)
    }
}

fn lerp(lo: f64, hi: f64, u: f64) -> f64 {
    lo + (hi - lo) * u
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::pseudo::SeededRandom;

    const TRIALS: usize = 20_000;

    #[test]
    fn test_non_wrapping_stays_inside() {
        let rng = SeededRandom::new(42);
        let bounds = Bounds::new(10.0, 20.0, -5.0, 5.0);

        for _ in 0..1000 {
            let p = sample_uniform(Some(&bounds), &rng).unwrap();
            assert!((10.0..=20.0).contains(&p.lat), "lat {} outside", p.lat);
            assert!((-5.0..=5.0).contains(&p.lng), "lng {} outside", p.lng);
        }
    }

    #[test]
    fn test_wrapping_segments_split_evenly() {
        let rng = SeededRandom::new(7);
        let bounds = Bounds::new(-10.0, 10.0, 170.0, -170.0);

        let mut west_segment = 0usize;
        for _ in 0..TRIALS {
            let p = sample_uniform(Some(&bounds), &rng).unwrap();
            let in_west = (170.0..=180.0).contains(&p.lng);
            let in_east = (-180.0..=-170.0).contains(&p.lng);
            assert!(in_west || in_east, "lng {} outside wrapped span", p.lng);
            if in_west {
                west_segment += 1;
            }
        }

        let fraction = west_segment as f64 / TRIALS as f64;
        assert!(
            (0.47..=0.53).contains(&fraction),
            "West segment fraction {} should be about 0.5",
            fraction
        );
    }

    #[test]
    fn test_wrapping_segments_weighted_by_span() {
        // 20 degrees west of the antimeridian, 10 degrees east of it
        let rng = SeededRandom::new(99);
        let bounds = Bounds::new(-10.0, 10.0, 160.0, -170.0);

        let west_segment = (0..TRIALS)
            .map(|_| sample_uniform(Some(&bounds), &rng).unwrap())
            .filter(|p| p.lng >= 160.0)
            .count();

        let fraction = west_segment as f64 / TRIALS as f64;
        assert!(
            (0.63..=0.70).contains(&fraction),
            "West segment fraction {} should be about 2/3",
            fraction
        );
    }

    #[test]
    fn test_no_bounds_avoids_poles() {
        let rng = SeededRandom::new(3);
        for _ in 0..1000 {
            let p = sample_uniform(None, &rng).unwrap();
            assert!((-85.0..=85.0).contains(&p.lat));
            assert!((-180.0..=180.0).contains(&p.lng));
        }
    }

    #[test]
    fn test_degenerate_bounds_yield_single_point() {
        let rng = SeededRandom::new(1);
        let bounds = Bounds::new(12.5, 12.5, 45.0, 45.0);
        for _ in 0..10 {
            let p = sample_uniform(Some(&bounds), &rng).unwrap();
            assert_eq!(p, Coordinates::new(12.5, 45.0));
        }
    }
}
