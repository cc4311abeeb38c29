use serde::{Deserialize, Serialize};
use crate::core::accessibility::AccessibilityScore;
use crate::data::poi::{GeoPoint, POI};

/// One input row. `point` is `None` when the address failed to geocode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub point: Option<GeoPoint>,
}

impl Location {
    pub fn new(id: String, name: String, address: String, point: Option<GeoPoint>) -> Self {
        Self { id, name, address, point }
    }

    pub fn is_resolved(&self) -> bool {
        self.get_point().is_some()
    }
}

impl POI for Location {
    fn get_point(&self) -> Option<&GeoPoint> {
        self.point.as_ref()
    }

    fn get_id(&self) -> &str {
        &self.id
    }
}

/// A resolved location with its accessibility score attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub point: GeoPoint,
    pub score: AccessibilityScore,
}

impl ScoredLocation {
    pub fn average_distance(&self) -> f64 {
        self.score.average_distance
    }
}

/// Pairs each resolved location, in order, with the score at the same position.
/// `scores` must have been computed from exactly those locations' points.
pub fn attach_scores(locations: &[Location], scores: &[AccessibilityScore]) -> Vec<ScoredLocation> {
    locations
        .iter()
        .filter_map(|location| location.get_point().map(|point| (location, *point)))
        .zip(scores.iter())
        .map(|((location, point), score)| ScoredLocation {
            id: location.get_id().to_string(),
            name: location.name.clone(),
            address: location.address.clone(),
            point,
            score: *score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_locations_are_skipped_when_joining() {
        let locations = vec![
            Location::new("1".into(), "Library".into(), "1 Main".into(), Some(GeoPoint::new(1.0, 1.0).unwrap())),
            Location::new("2".into(), "Clinic".into(), "2 Main".into(), None),
            Location::new("3".into(), "School".into(), "3 Main".into(), Some(GeoPoint::new(2.0, 2.0).unwrap())),
        ];
        let scores = vec![
            AccessibilityScore { average_distance: 10.0, neighbors: 1 },
            AccessibilityScore { average_distance: 20.0, neighbors: 1 },
        ];

        let scored = attach_scores(&locations, &scores);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].id, "1");
        assert_eq!(scored[1].id, "3");
        assert_eq!(scored[1].average_distance(), 20.0);
        assert_eq!(locations[1].get_point(), None);
    }
}
