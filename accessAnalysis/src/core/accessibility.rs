use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::core::distance::{great_circle, validate_radius, DistanceFormula};
use crate::core::error::DistanceError;
use crate::core::matrix::{validate_points, DistanceMatrix};
use crate::data::poi::GeoPoint;
use crate::utils::logging::{self, DistanceCalcType, OperationCategory};

/// Whether peers sharing a point's exact coordinates count as neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborPolicy {
    /// Coincident peers contribute a distance of 0 to the mean.
    #[default]
    KeepCoincident,
    /// Coincident peers are skipped.
    DeduplicateCoincident,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityScore {
    /// Mean distance to every other point, in the matrix unit.
    pub average_distance: f64,
    /// How many peers went into the mean.
    pub neighbors: usize,
}

/// Mean distance from each point to all others, in input order.
/// The diagonal never contributes.
pub fn average_distances(matrix: &DistanceMatrix) -> Result<Vec<AccessibilityScore>, DistanceError> {
    average_distances_with(matrix, NeighborPolicy::KeepCoincident)
}

/// Coincidence is decided from the stored coordinates, not from zero cells,
/// so this agrees with the streaming reduction under every policy.
pub fn average_distances_with(
    matrix: &DistanceMatrix,
    policy: NeighborPolicy,
) -> Result<Vec<AccessibilityScore>, DistanceError> {
    if matrix.len() <= 1 {
        return Err(DistanceError::EmptyInput { points: matrix.len() });
    }

    let _timing = logging::start_timing("average_distances",
        OperationCategory::DistanceCalculation { subcategory: DistanceCalcType::Reduction });

    let points = matrix.points();
    matrix
        .rows()
        .enumerate()
        .map(|(i, row)| {
            let origin = &points[i];
            let peers = row
                .iter()
                .zip(points)
                .filter_map(|(cell, other)| (*cell).filter(|_| is_peer(policy, origin, other)));
            mean_score(peers, i, points.len())
        })
        .collect()
}

/// Same scores as `average_distances(&distance_matrix(..))` without holding
/// the matrix: each row is computed and reduced on its own, keeping memory
/// at O(n). Each pair is computed twice as a result.
pub fn streaming_average_distances(
    points: &[GeoPoint],
    formula: DistanceFormula,
    radius: f64,
) -> Result<Vec<AccessibilityScore>, DistanceError> {
    streaming_average_distances_with(points, formula, radius, NeighborPolicy::KeepCoincident, true, || {})
}

/// `on_row` is called once per finished row, from whichever worker finished it.
pub fn streaming_average_distances_with<F>(
    points: &[GeoPoint],
    formula: DistanceFormula,
    radius: f64,
    policy: NeighborPolicy,
    parallel: bool,
    on_row: F,
) -> Result<Vec<AccessibilityScore>, DistanceError>
where
    F: Fn() + Sync,
{
    validate_points(points)?;
    validate_radius(radius)?;
    if points.len() <= 1 {
        return Err(DistanceError::EmptyInput { points: points.len() });
    }

    let _timing = logging::start_timing("streaming_average_distances",
        OperationCategory::DistanceCalculation { subcategory: DistanceCalcType::Streaming });
    debug!(points = points.len(), %formula, radius, parallel, "Streaming average distances");

    let score_row = |i: usize| -> Result<AccessibilityScore, DistanceError> {
        let origin = &points[i];
        let peers = points
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && is_peer(policy, origin, other))
            // Lower index first, so each value is bit-identical to the matrix cell
            .map(|(j, other)| {
                if i < j {
                    great_circle(origin, other, formula, radius)
                } else {
                    great_circle(other, origin, formula, radius)
                }
            });
        let score = mean_score(peers, i, points.len());
        on_row();
        score
    };

    if parallel {
        (0..points.len()).into_par_iter().map(score_row).collect()
    } else {
        (0..points.len()).map(score_row).collect()
    }
}

fn is_peer(policy: NeighborPolicy, origin: &GeoPoint, other: &GeoPoint) -> bool {
    match policy {
        NeighborPolicy::KeepCoincident => true,
        NeighborPolicy::DeduplicateCoincident => !origin.same_coordinates(other),
    }
}

fn mean_score(
    distances: impl Iterator<Item = f64>,
    index: usize,
    points: usize,
) -> Result<AccessibilityScore, DistanceError> {
    let (sum, count) = distances.fold((0.0, 0usize), |(sum, count), d| (sum + d, count + 1));
    if count == 0 {
        // Every peer was coincident and deduplicated away
        return Err(DistanceError::NoPeers { index, points });
    }
    Ok(AccessibilityScore {
        average_distance: sum / count as f64,
        neighbors: count,
    })
}
