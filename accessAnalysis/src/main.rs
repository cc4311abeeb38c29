use anyhow::{anyhow, Context, Result};
use clap::Parser;

use geoaccess::analysis::{pipeline, reporting};
use geoaccess::cli::cli::Args;
use geoaccess::config::analysis_config::AnalysisConfig;
use geoaccess::data::locations_loader;
use geoaccess::utils::csv_export::CsvExporter;
use geoaccess::utils::logging;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())
        .map_err(|e| anyhow!("failed to set up logging: {}", e))?;

    let base_config = match args.config() {
        Some(path) => AnalysisConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => AnalysisConfig::default(),
    };
    let config = args.apply_overrides(base_config);

    let locations = locations_loader::load_locations(args.input(), &config.address_rules)
        .with_context(|| format!("failed to load locations from {}", args.input()))?;

    let result = pipeline::run_analysis(&locations, &config, true)
        .context("accessibility analysis failed")?;

    reporting::print_summary(&result);

    if !args.no_export() {
        let exporter = CsvExporter::new(args.output_dir(), true)
            .with_context(|| format!("failed to create output directory under {}", args.output_dir()))?;
        exporter
            .export_results(&result)
            .map_err(|e| anyhow!("failed to export results: {}", e))?;
    }

    logging::print_timing_report();

    Ok(())
}
