use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;
use crate::config::analysis_config::AnalysisConfig;
use crate::config::constants::PROGRESS_BAR_MIN_POINTS;
use crate::core::accessibility::{average_distances_with, streaming_average_distances_with};
use crate::core::distance::{DistanceFormula, DistanceUnit};
use crate::core::error::DistanceError;
use crate::core::matrix::distance_matrix_with;
use crate::data::locations_loader::GeocodeSummary;
use crate::data::poi::{GeoPoint, POI};
use crate::models::location::{attach_scores, Location, ScoredLocation};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub scored: Vec<ScoredLocation>,
    pub geocoding: GeocodeSummary,
    pub formula: DistanceFormula,
    pub unit: DistanceUnit,
    pub streamed: bool,
}

/// Scores every resolved location by its average distance to the others.
///
/// Unresolved locations are excluded and only counted in `geocoding`. Small
/// inputs go through the full matrix; above the configured threshold rows
/// are reduced as they are computed.
pub fn run_analysis(
    locations: &[Location],
    config: &AnalysisConfig,
    show_progress: bool,
) -> Result<AnalysisResult, DistanceError> {
    let geocoding = GeocodeSummary::from_locations(locations);
    let points: Vec<GeoPoint> = locations.iter().filter_map(|l| l.get_point().copied()).collect();
    let radius = config.radius()?;
    let streamed = config.use_streaming(points.len());

    info!(
        points = points.len(),
        dropped = geocoding.unresolved,
        formula = %config.formula,
        unit = %config.unit,
        streamed,
        "Running accessibility analysis"
    );

    let scores = if streamed {
        let progress = progress_bar(points.len(), show_progress);
        let scores = streaming_average_distances_with(
            &points,
            config.formula,
            radius,
            config.neighbor_policy,
            config.parallel,
            || progress.inc(1),
        );
        progress.finish_and_clear();
        scores?
    } else {
        let matrix = distance_matrix_with(&points, config.formula, radius, config.parallel)?;
        average_distances_with(&matrix, config.neighbor_policy)?
    };

    Ok(AnalysisResult {
        scored: attach_scores(locations, &scores),
        geocoding,
        formula: config.formula,
        unit: config.unit,
        streamed,
    })
}

fn progress_bar(len: usize, show_progress: bool) -> ProgressBar {
    if !show_progress || len < PROGRESS_BAR_MIN_POINTS {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} rows ({eta})") {
        bar.set_style(style);
    }
    bar
}
