//! End-to-end runs: CSV of geocoded sites in, scored CSV out.

use std::fs;

use geoaccess::analysis::pipeline::run_analysis;
use geoaccess::config::analysis_config::AnalysisConfig;
use geoaccess::config::constants::{EARTH_RADIUS_MILES, OUTPUT_FILE_NAME};
use geoaccess::core::accessibility::NeighborPolicy;
use geoaccess::data::address::default_rules;
use geoaccess::data::locations_loader::{load_locations, GeocodeSummary};
use geoaccess::utils::csv_export::CsvExporter;
use geoaccess::{average_distances, distance, distance_matrix, DistanceError, DistanceFormula, GeoPoint};
use tempfile::TempDir;

const SITES: &str = "\
id,name,address,latitude,longitude
1,Downtown Library,710 W Cesar Chavez St.,30.2672,-97.7431
2,North Branch,1100 Congress Ave.,30.2711,-97.7437
3,Music Row Office,1 Music Sq. #200,36.1627,-86.7816
4,Unknown Depot,12 Nowhere Rd.,NA,NA
5,Downtown Annex,710 W Cesar Chavez St.,30.2672,-97.7431
";

fn write_sites(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("sites.csv");
    fs::write(&path, SITES).unwrap();
    path
}

#[test]
fn csv_to_scores_round_trip() {
    let dir = TempDir::new().unwrap();
    let locations = load_locations(write_sites(&dir), &default_rules()).unwrap();

    let summary = GeocodeSummary::from_locations(&locations);
    assert_eq!(summary.resolved, 4);
    assert_eq!(summary.unresolved, 1);
    assert!((summary.drop_rate() - 0.2).abs() < 1e-12);

    let result = run_analysis(&locations, &AnalysisConfig::default(), false).unwrap();
    let ids: Vec<&str> = result.scored.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "5"]);

    // Nashville is far from the three Austin sites
    let nashville = &result.scored[2];
    assert!(result.scored.iter().all(|s| s.average_distance() <= nashville.average_distance()));

    let exporter = CsvExporter::new(dir.path().join("out"), false).unwrap();
    let scores_path = exporter.export_results(&result).unwrap();
    assert!(scores_path.ends_with(OUTPUT_FILE_NAME));

    let written = fs::read_to_string(scores_path).unwrap();
    assert_eq!(written.lines().count(), 5);
    assert!(written.contains("1100 Congress Avenue"));
    assert!(written.contains("1 Music Sq. Unit 200"));
}

#[test]
fn dedupe_changes_only_coincident_sites() {
    let dir = TempDir::new().unwrap();
    let locations = load_locations(write_sites(&dir), &default_rules()).unwrap();

    let kept = run_analysis(&locations, &AnalysisConfig::default(), false).unwrap();
    let deduped_config = AnalysisConfig {
        neighbor_policy: NeighborPolicy::DeduplicateCoincident,
        ..Default::default()
    };
    let deduped = run_analysis(&locations, &deduped_config, false).unwrap();

    // Sites 1 and 5 share coordinates; site 3 has no coincident peer
    assert!(deduped.scored[0].average_distance() > kept.scored[0].average_distance());
    assert_eq!(deduped.scored[2], kept.scored[2]);
}

#[test]
fn public_engine_scenarios() {
    let nashville = GeoPoint::new(36.1627, -86.7816).unwrap();
    let austin = GeoPoint::new(30.2672, -97.7431).unwrap();

    let d = distance(&nashville, &austin, DistanceFormula::Haversine, EARTH_RADIUS_MILES).unwrap();
    let matrix = distance_matrix(&[nashville, austin], DistanceFormula::Haversine, EARTH_RADIUS_MILES).unwrap();
    let scores = average_distances(&matrix).unwrap();

    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].average_distance, d);
    assert_eq!(scores[1].average_distance, d);

    let single = distance_matrix(&[austin], DistanceFormula::Haversine, EARTH_RADIUS_MILES).unwrap();
    assert_eq!(average_distances(&single), Err(DistanceError::EmptyInput { points: 1 }));
}

#[test]
fn bad_coordinates_fail_the_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "id,latitude,longitude\n1,30.0,-200.0\n").unwrap();
    assert!(load_locations(&path, &[]).is_err());
}

#[test]
fn dedupe_result_does_not_depend_on_streaming() {
    let csv = "\
id,name,latitude,longitude
1,Downtown,30.2672,-97.7431
2,Downtown Kiosk,30.2672,-97.74310001
3,Music Row,36.1627,-86.7816
4,North Pole Camp,90.0,0.0
5,North Pole Hut,90.0,10.0
";
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("close.csv");
    fs::write(&path, csv).unwrap();
    let locations = load_locations(&path, &[]).unwrap();

    let materialized_config = AnalysisConfig {
        formula: DistanceFormula::SphericalLawOfCosines,
        neighbor_policy: NeighborPolicy::DeduplicateCoincident,
        ..Default::default()
    };
    let streamed_config = AnalysisConfig { force_streaming: true, ..materialized_config.clone() };

    let materialized = run_analysis(&locations, &materialized_config, false).unwrap();
    let streamed = run_analysis(&locations, &streamed_config, false).unwrap();

    assert!(!materialized.streamed && streamed.streamed);
    assert_eq!(materialized.scored, streamed.scored);
    // No two sites share exact coordinates, so nobody is skipped
    assert!(materialized.scored.iter().all(|s| s.score.neighbors == 4));
}
