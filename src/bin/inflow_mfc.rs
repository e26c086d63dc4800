use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use inflow_mfc::{CorrectionConfig, CorrectionConfigBuilder, InflowCorrector};

/// Rescale synthetic inflow turbulence to a prescribed bulk velocity
#[derive(Parser)]
#[command(name = "inflow_mfc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inlet mass flux correction for synthetic turbulence", long_about = None)]
struct Cli {
    /// YAML configuration; built-in test case values are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inlet patch face area vectors (comma separated)
    #[arg(long)]
    geometry: Option<PathBuf>,

    /// Input HDF5 file with U, V, W and UMEAN
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output HDF5 file, overwritten if present
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON report of the run
    #[arg(long)]
    report: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", value_parser = clap::value_parser!(Level))]
    log_level: Level,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e);
        }
    };

    let corrector = InflowCorrector::new(config)?;
    match corrector.run() {
        Ok(report) => {
            info!(
                "Corrected {} points x {} samples to Ub = {:.3} m/s (max relative error {:.2e})",
                report.n_points,
                report.n_times,
                report.target_bulk_velocity,
                report.max_relative_error
            );
            Ok(())
        }
        Err(e) => {
            error!("Correction failed: {}", e);
            Err(e.into())
        }
    }
}

fn load_config(cli: &Cli) -> Result<CorrectionConfig, Box<dyn std::error::Error>> {
    let mut builder = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            CorrectionConfigBuilder::from_config(&CorrectionConfig::load(path)?)
        }
        None => CorrectionConfigBuilder::new(),
    };

    if let Some(geometry) = &cli.geometry {
        builder = builder.geometry_path(geometry);
    }
    if let Some(input) = &cli.input {
        builder = builder.input_path(input);
    }
    if let Some(output) = &cli.output {
        builder = builder.output_path(output);
    }
    if let Some(report) = &cli.report {
        builder = builder.report_path(report);
    }

    Ok(builder.build()?)
}
