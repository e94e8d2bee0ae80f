//! WenuFilter
//!
//! Batch filter for single-electron W→eν candidate events.
//!
//! Reads events from JSON-lines files, keeps events with exactly one electron
//! above the configured threshold and no second hard electron, and writes one
//! CSV line per kept event.

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use wenu_core::JsonLinesSource;
use wenu_output::CsvSink;
use wenu_selection::SelectionPipeline;

mod config;

#[derive(Parser, Debug)]
#[command(name = "wenu-filter")]
#[command(version, about = "Select single-electron W->enu candidate events", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "WENU_CONFIG", default_value = "wenu.yaml")]
    config: PathBuf,

    /// Event files (JSON lines), read in order; replaces the configured list
    #[arg(short, long = "input", num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output CSV path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Primary electron pt threshold (GeV)
    #[arg(short, long)]
    min_electron_pt: Option<f64>,

    /// Stop after this many certified events
    #[arg(short = 'n', long)]
    max_events: Option<u64>,

    /// Certified lumi-section JSON
    #[arg(short, long)]
    lumi_mask: Option<PathBuf>,

    /// Write the run's counters in Prometheus text format to this file
    #[arg(long)]
    metrics_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting WenuFilter");

    let metrics_handle = init_metrics()?;

    let config = config::load(&cli)?;
    info!("Configuration loaded successfully");
    info!("Electrons: {}", config.electron_input_tag);
    info!("PF MET: {}", config.pf_met_input_tag);
    info!("Minimum electron pt: {} GeV", config.min_electron_pt()?);
    info!("Input files: {}", config.input_files.len());

    let pipeline_config = config
        .pipeline_config()
        .context("failed to build pipeline configuration")?;
    let pipeline = SelectionPipeline::new(pipeline_config);

    let mut source = JsonLinesSource::new(&config.input_files);
    let mut sink = CsvSink::create(&config.csv_file_name)
        .with_context(|| format!("failed to open output {:?}", config.csv_file_name))?;

    let summary = pipeline
        .run(&mut source, &mut sink)
        .context("selection run failed")?;

    info!(
        "Wrote {} records to {:?} ({} malformed input lines skipped)",
        summary.records_written,
        config.csv_file_name,
        source.skipped_lines()
    );

    if let Some(path) = &cli.metrics_file {
        write_metrics(&metrics_handle, path)?;
        info!("Metrics written to {:?}", path);
    }
    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("wenu=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wenu=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Install the Prometheus recorder behind the `metrics` facade
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    metrics::describe_counter!(
        "wenu_events_total",
        "Events handed to the selector after masking and the event cap"
    );
    metrics::describe_counter!(
        "wenu_records_written_total",
        "Accepted events written to the output"
    );
    metrics::describe_counter!(
        "wenu_events_rejected_total",
        "Rejected events by reason"
    );
}

fn write_metrics(handle: &PrometheusHandle, path: &Path) -> Result<()> {
    let rendered = handle.render();
    debug!("Metrics snapshot:\n{}", rendered);
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write metrics to {:?}", path))
}
