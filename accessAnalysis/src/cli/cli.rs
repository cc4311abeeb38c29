use clap::Parser;
use crate::config::analysis_config::AnalysisConfig;
use crate::core::accessibility::NeighborPolicy;
use crate::core::distance::{DistanceFormula, DistanceUnit};

#[derive(Parser)]
#[command(author, version, about = "Average great-circle distance from each geocoded location to all others", long_about = None)]
pub struct Args {
    #[arg(short, long, help = "CSV of geocoded locations (id,name,address,latitude,longitude)")]
    input: String,

    #[arg(short, long, default_value = "results")]
    output_dir: String,

    #[arg(long, help = "JSON analysis config; flags below override it")]
    config: Option<String>,

    #[arg(short, long, help = "haversine or cosines")]
    formula: Option<DistanceFormula>,

    #[arg(short, long, help = "miles or kilometers")]
    unit: Option<DistanceUnit>,

    #[arg(long, help = "Sphere radius in the chosen unit, replaces the earth radius")]
    radius: Option<f64>,

    #[arg(long, help = "Skip peers with identical coordinates when averaging", default_value_t = false)]
    dedupe: bool,

    #[arg(long, help = "Reduce row by row instead of building the full matrix", default_value_t = false)]
    streaming: bool,

    #[arg(long, default_value_t = false)]
    sequential: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,

    #[arg(long, help = "Skip writing CSV output", default_value_t = false)]
    no_export: bool,
}

impl Args {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn no_export(&self) -> bool {
        self.no_export
    }

    /// Applies command-line overrides on top of `config`.
    pub fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(formula) = self.formula {
            config.formula = formula;
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(radius) = self.radius {
            config.radius_override = Some(radius);
        }
        if self.dedupe {
            config.neighbor_policy = NeighborPolicy::DeduplicateCoincident;
        }
        if self.streaming {
            config.force_streaming = true;
        }
        if self.sequential {
            config.parallel = false;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "geoaccess", "--input", "points.csv", "--formula", "cosines", "--unit", "km", "--dedupe", "--sequential",
        ]);
        let config = args.apply_overrides(AnalysisConfig::default());

        assert_eq!(args.input(), "points.csv");
        assert_eq!(args.output_dir(), "results");
        assert_eq!(config.formula, DistanceFormula::SphericalLawOfCosines);
        assert_eq!(config.unit, DistanceUnit::Kilometers);
        assert_eq!(config.neighbor_policy, NeighborPolicy::DeduplicateCoincident);
        assert!(!config.parallel);
        assert!(!config.force_streaming);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::parse_from(["geoaccess", "-i", "points.csv"]);
        let base = AnalysisConfig { radius_override: Some(10.0), ..Default::default() };
        assert_eq!(args.apply_overrides(base.clone()), base);
    }

    #[test]
    fn rejects_unknown_formula() {
        assert!(Args::try_parse_from(["geoaccess", "-i", "p.csv", "--formula", "vincenty"]).is_err());
    }
}
