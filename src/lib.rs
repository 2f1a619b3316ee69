#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod render;
pub mod utils;

// Re-export commonly used types outside of crate (for bin/inspect.rs and tests)
pub use analysis::{SimulationDataset, SimulationSummary};
pub use config::PERSISTENCE;
pub use data::LoadError;
pub use domain::{ChartKind, FixedPointScale};
pub use render::{RenderOptions, RenderReport};

use std::path::{Path, PathBuf};

use anyhow::Context;
// CLI argument parsing
use clap::Parser;

use config::FIXED_POINT;
use data::load_simulation_document;
use render::{render_all, text_support};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Render diagnostic charts from a recorded DEX simulation", long_about = None)]
pub struct Cli {
    /// Simulation document (JSON) to read
    #[arg(short, long, default_value = PERSISTENCE.input.simulation_path)]
    pub input: PathBuf,

    /// Directory the charts are written to (created if missing)
    #[arg(short, long, default_value = PERSISTENCE.output.directory)]
    pub output_dir: PathBuf,

    /// Fixed-point exponent of the raw integers (18 = wei)
    #[arg(long, default_value_t = FIXED_POINT.decimals)]
    pub decimals: u32,

    /// Only write the combined overview figure
    #[arg(long, default_value_t = false)]
    pub skip_individual: bool,

    /// Do not log the end-of-run summary table
    #[arg(long, default_value_t = false)]
    pub no_summary: bool,

    /// TrueType font for chart text (defaults to $DEX_CHARTS_FONT, then system fonts).
    /// The font is registered once per process: later runs in the same process keep
    /// the first font found and ignore this value.
    #[arg(long)]
    pub font: Option<PathBuf>,
}

/// Everything a run produced.
#[derive(Debug)]
pub struct RunReport {
    pub dataset: SimulationDataset,
    /// `None` with `--no-summary`
    pub summary: Option<SimulationSummary>,
    pub render: RenderReport,
}

/// Reads and normalizes a simulation document. Fails only on fatal input errors.
pub fn load_dataset(input: &Path, decimals: u32) -> anyhow::Result<SimulationDataset> {
    log::info!("Loading data from {:?}...", input);
    let document = load_simulation_document(input)
        .with_context(|| format!("Failed to load simulation data from {:?}", input))?;
    Ok(SimulationDataset::from_document(
        &document,
        FixedPointScale::from_decimals(decimals),
    ))
}

/// Main pipeline entry point: load, normalize, render, summarize.
pub fn run(cli: &Cli) -> anyhow::Result<RunReport> {
    let dataset = crate::trace_time!("Load and normalize", 100_000, {
        load_dataset(&cli.input, cli.decimals)
    })?;

    let options = RenderOptions {
        output_dir: cli.output_dir.clone(),
        individual: !cli.skip_individual,
        text: text_support(cli.font.as_deref()),
    };
    let render = render_all(&dataset, &options)
        .with_context(|| format!("Failed to prepare output directory {:?}", cli.output_dir))?;
    log::info!(
        "Plots saved to {:?} ({} written, {} failed)",
        cli.output_dir,
        render.written.len(),
        render.failed.len()
    );

    let summary = (!cli.no_summary).then(|| SimulationSummary::from_dataset(&dataset));
    if let Some(summary) = &summary {
        log::info!("Simulation summary:\n{}", summary.render_tables());
    }

    Ok(RunReport {
        dataset,
        summary,
        render,
    })
}
