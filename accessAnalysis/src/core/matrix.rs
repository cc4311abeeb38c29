use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;
use crate::core::distance::{great_circle, validate_radius, DistanceFormula};
use crate::core::error::DistanceError;
use crate::data::poi::GeoPoint;
use crate::utils::logging::{self, DistanceCalcType, OperationCategory};

/// All-pairs great-circle distances over an ordered point sequence.
///
/// Stored row-major. Diagonal cells are `None`: self-distance is not a
/// neighbor and has no numeric value. Off-diagonal cells are always `Some`
/// and `get(i, j) == get(j, i)`. There is no mutating API.
///
/// The points are kept alongside the cells: a zero cell does not imply equal
/// coordinates (polar points, or sub-metre pairs under the Law of Cosines).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Option<f64>>,
    points: Vec<GeoPoint>,
    formula: DistanceFormula,
    radius: f64,
}

impl DistanceMatrix {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn formula(&self) -> DistanceFormula {
        self.formula
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// `None` on the diagonal or out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.cells[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[Option<f64>] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        // chunks(0) panics, so an empty matrix yields no rows via take(0)
        self.cells.chunks(self.size.max(1)).take(self.size)
    }
}

/// Builds the distance matrix using the rayon pool.
pub fn distance_matrix(
    points: &[GeoPoint],
    formula: DistanceFormula,
    radius: f64,
) -> Result<DistanceMatrix, DistanceError> {
    distance_matrix_with(points, formula, radius, true)
}

/// Validates every point before computing anything, then computes the upper
/// triangle (optionally in parallel, one task per row) and mirrors it.
pub fn distance_matrix_with(
    points: &[GeoPoint],
    formula: DistanceFormula,
    radius: f64,
    parallel: bool,
) -> Result<DistanceMatrix, DistanceError> {
    validate_points(points)?;
    validate_radius(radius)?;

    let _timing = logging::start_timing("distance_matrix",
        OperationCategory::DistanceCalculation { subcategory: DistanceCalcType::Matrix });

    let n = points.len();
    debug!(points = n, %formula, radius, parallel, "Building distance matrix");

    let upper_row = |i: usize| -> Vec<f64> {
        points[i + 1..]
            .iter()
            .map(|other| great_circle(&points[i], other, formula, radius))
            .collect()
    };

    let upper: Vec<Vec<f64>> = if parallel {
        (0..n).into_par_iter().map(upper_row).collect()
    } else {
        (0..n).map(upper_row).collect()
    };

    let mut cells = vec![None; n * n];
    for (i, row) in upper.into_iter().enumerate() {
        for (offset, d) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            cells[i * n + j] = Some(d);
            cells[j * n + i] = Some(d);
        }
    }

    Ok(DistanceMatrix {
        size: n,
        cells,
        points: points.to_vec(),
        formula,
        radius,
    })
}

pub(crate) fn validate_points(points: &[GeoPoint]) -> Result<(), DistanceError> {
    let _timing = logging::start_timing("validate_points", OperationCategory::Validation);
    points
        .iter()
        .enumerate()
        .try_for_each(|(index, point)| point.validate().map_err(|e| e.with_index(index)))
}
