use std::fs::File;
use std::path::{Path, PathBuf};
use std::io::Write;
use std::error::Error;
use chrono::Local;
use csv::Writer;

use crate::analysis::pipeline::AnalysisResult;
use crate::analysis::reporting::AccessibilitySummary;
use crate::config::constants::OUTPUT_FILE_NAME;
use crate::utils::logging::{self, OperationCategory};

/// Writes run results into `<output_dir>/<timestamp>/`.
pub struct CsvExporter {
    output_dir: PathBuf,
    timestamp: String,
    verbose_logging: bool,
}

impl CsvExporter {
    /// Creates the timestamped run directory under `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>, verbose_logging: bool) -> std::io::Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = output_dir.as_ref().join(&timestamp);
        std::fs::create_dir_all(&full_path)?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
            verbose_logging,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export scores and the run summary
    pub fn export_results(&self, result: &AnalysisResult) -> Result<PathBuf, Box<dyn Error>> {
        let _timing = logging::start_timing("export_results", OperationCategory::Export);

        let scores_path = self.export_scores(result)?;
        self.export_summary(result)?;

        if self.verbose_logging {
            println!("CSV export completed successfully to: {}", self.output_dir.display());
        }

        Ok(scores_path)
    }

    /// One row per resolved location, in input order
    fn export_scores(&self, result: &AnalysisResult) -> Result<PathBuf, Box<dyn Error>> {
        let scores_path = self.output_dir.join(OUTPUT_FILE_NAME);
        let mut writer = Writer::from_path(&scores_path)?;

        writer.write_record([
            "id", "name", "address", "latitude", "longitude", "average_distance", "neighbors", "unit", "formula",
        ])?;

        let unit = result.unit.to_string();
        let formula = result.formula.to_string();
        for location in &result.scored {
            writer.write_record(&[
                location.id.clone(),
                location.name.clone(),
                location.address.clone(),
                location.point.latitude.to_string(),
                location.point.longitude.to_string(),
                format!("{:.6}", location.average_distance()),
                location.score.neighbors.to_string(),
                unit.clone(),
                formula.clone(),
            ])?;
        }
        writer.flush()?;

        if self.verbose_logging {
            println!("Exported {} scores to: {}", result.scored.len(), scores_path.display());
        }

        Ok(scores_path)
    }

    fn export_summary(&self, result: &AnalysisResult) -> Result<(), Box<dyn Error>> {
        let summary_path = self.output_dir.join("run_summary.csv");
        let mut summary_file = File::create(&summary_path)?;

        writeln!(summary_file, "Accessibility Run Summary")?;
        writeln!(summary_file, "Timestamp,{}", self.timestamp)?;
        writeln!(summary_file, "Formula,{}", result.formula)?;
        writeln!(summary_file, "Unit,{}", result.unit)?;
        writeln!(summary_file, "Streamed,{}", result.streamed)?;
        writeln!(summary_file)?;

        writeln!(summary_file, "Geocoding")?;
        writeln!(summary_file, "Total Addresses,{}", result.geocoding.total)?;
        writeln!(summary_file, "Resolved,{}", result.geocoding.resolved)?;
        writeln!(summary_file, "Unresolved,{}", result.geocoding.unresolved)?;
        writeln!(summary_file, "Drop Rate (%),{:.2}", result.geocoding.drop_rate() * 100.0)?;
        writeln!(summary_file)?;

        if let Some(summary) = AccessibilitySummary::from_scores(&result.scored) {
            writeln!(summary_file, "Average Distance")?;
            writeln!(summary_file, "Min,{:.6}", summary.min)?;
            writeln!(summary_file, "Max,{:.6}", summary.max)?;
            writeln!(summary_file, "Mean,{:.6}", summary.mean)?;
            writeln!(summary_file, "Most Accessible,{}", summary.most_accessible)?;
            writeln!(summary_file, "Least Accessible,{}", summary.least_accessible)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::run_analysis;
    use crate::config::analysis_config::AnalysisConfig;
    use crate::data::poi::GeoPoint;
    use crate::models::location::Location;
    use tempfile::tempdir;

    #[test]
    fn writes_scores_and_summary() {
        let dir = tempdir().unwrap();
        let locations = vec![
            Location::new("a".into(), "Alpha".into(), "1 First St".into(), Some(GeoPoint::new(0.0, 0.0).unwrap())),
            Location::new("b".into(), "Beta".into(), "2 Second St".into(), Some(GeoPoint::new(0.0, 1.0).unwrap())),
            Location::new("c".into(), "Gamma".into(), "nowhere".into(), None),
        ];
        let result = run_analysis(&locations, &AnalysisConfig::default(), false).unwrap();

        let exporter = CsvExporter::new(dir.path(), false).unwrap();
        let scores_path = exporter.export_results(&result).unwrap();
        assert!(scores_path.starts_with(dir.path()));

        let mut reader = csv::Reader::from_path(&scores_path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "a");
        assert_eq!(&rows[1][7], "miles");
        assert_eq!(&rows[1][8], "haversine");

        let summary = std::fs::read_to_string(exporter.output_dir().join("run_summary.csv")).unwrap();
        assert!(summary.contains("Unresolved,1"));
        assert!(summary.contains("Drop Rate (%),33.33"));
    }
}
