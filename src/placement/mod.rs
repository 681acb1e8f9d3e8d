//! Tree placement by rejection sampling
//!
//! Candidates are drawn uniformly inside the viewport, checked against the
//! spacing rule (cheap, synchronous) and then against the land classifier
//! (expensive, may hit the network). Classification is awaited one candidate
//! at a time and only for candidates that already pass the spacing rule.
//!
//! The attempt budget `max(1000, 800 * count)` bounds every run, so sparse
//! land or unreachable tile servers yield a short result instead of a hang.

use crate::constants::placement::{ATTEMPTS_PER_POINT, MIN_ATTEMPTS};
use crate::coord::geodesy::is_far_from_all;
use crate::coord::sampler::sample_uniform;
use crate::coord::{Bounds, Coordinates, GeoPoint};
use crate::error::{Error, Result};
use crate::land::LandClassifier;
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Upper bound on up-front allocation for placed trees
const PREALLOCATE_LIMIT: usize = 1024;

/// A request to place `count` new trees
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    /// Viewport to place into; the whole world (minus poles) when absent
    #[serde(default)]
    pub bounds: Option<Bounds>,

    /// Trees already on the map that new trees must keep their distance from
    #[serde(default)]
    pub existing_points: Vec<GeoPoint>,

    /// Number of new trees wanted
    pub count: usize,

    /// Minimum great-circle spacing between any two trees
    pub min_distance_meters: f64,
}

impl PlacementRequest {
    /// Create a request with no existing trees
    pub fn new(bounds: Option<Bounds>, count: usize, min_distance_meters: f64) -> Self {
        Self {
            bounds,
            existing_points: Vec::new(),
            count,
            min_distance_meters,
        }
    }

    /// Respect these already-placed trees
    pub fn with_existing(mut self, points: Vec<GeoPoint>) -> Self {
        self.existing_points = points;
        self
    }

    /// Reject input the sampler cannot work with
    pub fn validate(&self) -> Result<()> {
        if let Some(bounds) = &self.bounds {
            bounds.validate()?;
        }

        if !self.min_distance_meters.is_finite() || self.min_distance_meters < 0.0 {
            return Err(Error::InvalidDistance(format!(
                "Minimum distance must be a non-negative number, got {}",
                self.min_distance_meters
            )));
        }

        for point in &self.existing_points {
            point.coords().validate()?;
        }

        Ok(())
    }
}

/// Outcome of a placement run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
    /// Newly accepted trees, in acceptance order
    pub placed: Vec<GeoPoint>,

    /// Candidates drawn, accepted or not
    pub attempts_used: usize,
}

/// Attempt budget for a request of `count` trees
pub fn max_attempts(count: usize) -> usize {
    count.saturating_mul(ATTEMPTS_PER_POINT).max(MIN_ATTEMPTS)
}

/// Places trees using a land classifier and a random source
pub struct PlacementEngine<'a, C> {
    classifier: &'a C,
    rng: &'a dyn RandomSource,
}

impl<'a, C: LandClassifier> PlacementEngine<'a, C> {
    /// Create an engine
    pub fn new(classifier: &'a C, rng: &'a dyn RandomSource) -> Self {
        Self { classifier, rng }
    }

    /// Run one placement
    ///
    /// Returns fewer than `count` trees when the attempt budget runs out;
    /// that is a normal outcome, not an error. Invalid requests are rejected
    /// before any candidate is drawn.
    pub async fn place(&self, request: &PlacementRequest) -> Result<PlacementResult> {
        request.validate()?;

        if request.count == 0 {
            return Ok(PlacementResult::default());
        }

        let target = request.existing_points.len().saturating_add(request.count);
        let budget = max_attempts(request.count);

        let mut occupied: Vec<Coordinates> =
            request.existing_points.iter().map(GeoPoint::coords).collect();
        let mut placed = Vec::with_capacity(request.count.min(PREALLOCATE_LIMIT));
        let mut attempts = 0;
        let mut too_close = 0;
        let mut on_water = 0;

        while occupied.len() < target && attempts < budget {
            attempts += 1;

            let candidate = sample_uniform(request.bounds.as_ref(), self.rng)?;

            if !is_far_from_all(candidate, &occupied, request.min_distance_meters) {
                too_close += 1;
                continue;
            }

            if !self.classifier.is_land(candidate).await {
                on_water += 1;
                continue;
            }

            debug!(lat = candidate.lat, lng = candidate.lng, attempts, "Accepted tree");
            occupied.push(candidate);
            placed.push(GeoPoint::with_random_id(candidate));
        }

        info!(
            requested = request.count,
            placed = placed.len(),
            attempts,
            budget,
            too_close,
            on_water,
            "Placement finished"
        );

        Ok(PlacementResult {
            placed,
            attempts_used: attempts,
        })
    }
}

/// A placement run with its request, for output formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Unique ID for this run
    pub id: String,

    /// When the run finished (RFC 3339)
    pub timestamp: String,

    pub request: PlacementRequest,

    pub result: PlacementResult,
}

impl PlacementReport {
    /// Wrap a finished run
    pub fn new(request: PlacementRequest, result: PlacementResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            request,
            result,
        }
    }

    /// Whether fewer trees were placed than requested
    pub fn is_short(&self) -> bool {
        self.result.placed.len() < self.request.count
    }
}


#[cfg(test)]
mod tests {
    use super::stubs::*;
    use super::*;
    use crate::coord::geodesy::haversine_meters;
    use crate::random::pseudo::SeededRandom;
    use std::time::Duration;

    #[test]
    fn test_max_attempts() {
        assert_eq!(max_attempts(0), 1000);
        assert_eq!(max_attempts(1), 1000);
        assert_eq!(max_attempts(2), 1600);
        assert_eq!(max_attempts(200), 160_000);
        assert_eq!(max_attempts(usize::MAX), usize::MAX);
    }

    #[tokio::test]
    async fn test_always_land_places_everything() {
        let classifier = FixedClassifier::land();
        let rng = SeededRandom::new(42);
        let engine = PlacementEngine::new(&classifier, &rng);

        let request = PlacementRequest::new(Some(Bounds::world()), 5, 0.0);
        let result = engine.place(&request).await.unwrap();

        assert_eq!(result.placed.len(), 5);
        assert_eq!(result.attempts_used, 5);
        assert_eq!(classifier.calls(), 5);
    }

    #[tokio::test]
    async fn test_always_water_exhausts_budget() {
        let classifier = FixedClassifier::water();
        let rng = SeededRandom::new(42);
        let engine = PlacementEngine::new(&classifier, &rng);

        let request = PlacementRequest::new(Some(Bounds::world()), 5, 0.0);
        let result = engine.place(&request).await.unwrap();

        assert!(result.placed.is_empty());
        assert_eq!(result.attempts_used, max_attempts(5));
        assert_eq!(result.attempts_used, 4000);
    }

    #[tokio::test]
    async fn test_huge_count_runs_without_overflow() {
        let rng = SeededRandom::new(3);
        let engine = PlacementEngine::new(&YieldingWater, &rng);

        // The budget is effectively unbounded; the run only has to start cleanly
        let huge = PlacementRequest::new(None, 1usize << 60, 0.0);
        let run = tokio::time::timeout(Duration::from_millis(50), engine.place(&huge)).await;
        assert!(run.is_err());

        let saturating = PlacementRequest::new(None, usize::MAX, 0.0)
            .with_existing(vec![GeoPoint::new("existing", 10.0, 10.0)]);
        let run = tokio::time::timeout(Duration::from_millis(50), engine.place(&saturating)).await;
        assert!(run.is_err());
    }

    #[tokio::test]
    async fn test_zero_count_returns_immediately() {
        let classifier = FixedClassifier::land();
        let rng = SeededRandom::new(1);
        let engine = PlacementEngine::new(&classifier, &rng);

        let result = engine
            .place(&PlacementRequest::new(None, 0, 1000.0))
            .await
            .unwrap();

        assert!(result.placed.is_empty());
        assert_eq!(result.attempts_used, 0);
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_inverted_bounds_rejected_before_sampling() {
        let classifier = FixedClassifier::land();
        let rng = SeededRandom::new(1);
        let engine = PlacementEngine::new(&classifier, &rng);

        let request = PlacementRequest::new(Some(Bounds::new(10.0, -10.0, 0.0, 10.0)), 5, 0.0);
        let result = engine.place(&request).await;

        assert!(matches!(result, Err(Error::InvalidBounds(_))));
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_negative_distance_rejected() {
        let classifier = FixedClassifier::land();
        let rng = SeededRandom::new(1);
        let engine = PlacementEngine::new(&classifier, &rng);

        let result = engine.place(&PlacementRequest::new(None, 5, -1.0)).await;
        assert!(matches!(result, Err(Error::InvalidDistance(_))));
    }

    #[tokio::test]
    async fn test_spacing_holds_across_new_and_existing() {
        let classifier = FixedClassifier::land();
        let rng = SeededRandom::new(2024);
        let engine = PlacementEngine::new(&classifier, &rng);

        let existing = vec![
            GeoPoint::new("existing-1", 45.0, 10.0),
            GeoPoint::new("existing-2", 40.0, 0.0),
        ];
        let min_distance = 300_000.0;
        let request = PlacementRequest::new(Some(Bounds::new(30.0, 60.0, -10.0, 30.0)), 20, min_distance)
            .with_existing(existing.clone());

        let result = engine.place(&request).await.unwrap();

        assert!(result.placed.len() <= 20);
        assert!(result.attempts_used <= max_attempts(20));

        let all: Vec<Coordinates> = existing
            .iter()
            .chain(result.placed.iter())
            .map(GeoPoint::coords)
            .collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(
                    haversine_meters(*a, *b) >= min_distance - 1e-6,
                    "{:?} and {:?} are too close",
                    a,
                    b
                );
            }
        }

        // The request itself is not modified
        assert_eq!(request.existing_points, existing);
    }

    #[tokio::test]
    async fn test_distance_check_runs_before_classification() {
        let classifier = FixedClassifier::land();
        let rng = SeededRandom::new(5);
        let engine = PlacementEngine::new(&classifier, &rng);

        // Degenerate viewport: every candidate is the same point
        let bounds = Bounds::new(12.0, 12.0, 34.0, 34.0);
        let request = PlacementRequest::new(Some(bounds), 3, 10.0);
        let result = engine.place(&request).await.unwrap();

        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.attempts_used, max_attempts(3));
        assert_eq!(classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_degenerate_bounds_with_zero_distance() {
        let classifier = FixedClassifier::land();
        let rng = SeededRandom::new(5);
        let engine = PlacementEngine::new(&classifier, &rng);

        let bounds = Bounds::new(12.0, 12.0, 34.0, 34.0);
        let result = engine
            .place(&PlacementRequest::new(Some(bounds), 3, 0.0))
            .await
            .unwrap();

        assert_eq!(result.placed.len(), 3);
        let mut ids: Vec<&str> = result.placed.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_only_land_points_accepted() {
        let rng = SeededRandom::new(77);
        let engine = PlacementEngine::new(&EasternHemisphere, &rng);

        let result = engine
            .place(&PlacementRequest::new(None, 30, 0.0))
            .await
            .unwrap();

        assert_eq!(result.placed.len(), 30);
        assert!(result.attempts_used >= 30);
        assert!(result.placed.iter().all(|p| p.longitude > 0.0));
    }

    #[tokio::test]
    async fn test_wrapping_viewport_placement() {
        let classifier = FixedClassifier::land();
        let rng = SeededRandom::new(8);
        let engine = PlacementEngine::new(&classifier, &rng);

        let bounds = Bounds::new(-20.0, 20.0, 170.0, -170.0);
        let result = engine
            .place(&PlacementRequest::new(Some(bounds), 25, 0.0))
            .await
            .unwrap();

        assert_eq!(result.placed.len(), 25);
        assert!(result.placed.iter().all(|p| bounds.contains(p.coords())));
    }

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::json!({
            "bounds": {"south": -10.0, "north": 10.0, "west": 170.0, "east": -170.0},
            "existingPoints": [{"id": "a", "latitude": 1.0, "longitude": 2.0}],
            "count": 4,
            "minDistanceMeters": 500.0
        });
        let request: PlacementRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.count, 4);
        assert_eq!(request.existing_points.len(), 1);
        assert!(request.bounds.unwrap().wraps());

        let negative = serde_json::json!({"count": -1, "minDistanceMeters": 0.0});
        assert!(serde_json::from_value::<PlacementRequest>(negative).is_err());
    }

    #[test]
    fn test_result_wire_format() {
        let result = PlacementResult {
            placed: vec![GeoPoint::new("t1", 1.0, 2.0)],
            attempts_used: 9,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["attemptsUsed"], 9);
        assert_eq!(value["placed"][0]["id"], "t1");
    }

    #[test]
    fn test_report_is_short() {
        let request = PlacementRequest::new(None, 3, 0.0);
        let result = PlacementResult {
            placed: vec![GeoPoint::new("t1", 1.0, 2.0)],
            attempts_used: 1000,
        };
        let report = PlacementReport::new(request, result);
        assert!(report.is_short());
        assert!(!report.id.is_empty());
    }
}
