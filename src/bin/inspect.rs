//! Loads a simulation document and reports what the charts would show, without rendering.
//!
//! cargo run --bin inspect -- --input simulation_data.json
//! cargo run --bin inspect -- --json > report.json

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use strum::IntoEnumIterator;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use dex_sim_charts::analysis::FieldReport;
use dex_sim_charts::config::FIXED_POINT;
use dex_sim_charts::{ChartKind, PERSISTENCE, SimulationDataset, SimulationSummary, load_dataset};

#[derive(Parser, Debug)]
#[command(about = "Summarize a DEX simulation document and check it is chartable")]
struct Args {
    /// Simulation document (JSON) to read
    #[arg(short, long, default_value = PERSISTENCE.input.simulation_path)]
    input: PathBuf,

    /// Fixed-point exponent of the raw integers (18 = wei)
    #[arg(long, default_value_t = FIXED_POINT.decimals)]
    decimals: u32,

    /// Print a JSON report instead of tables
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ChartRow {
    #[tabled(rename = "Chart")]
    chart: String,
    #[tabled(rename = "File")]
    file: &'static str,
    #[tabled(rename = "Ready")]
    ready: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Values")]
    len: usize,
    #[tabled(rename = "Absent")]
    absent: usize,
    #[tabled(rename = "Unparseable")]
    failures: usize,
}

impl From<&FieldReport> for FieldRow {
    fn from(r: &FieldReport) -> Self {
        Self {
            field: r.field,
            len: r.len,
            absent: r.absent,
            failures: r.failures,
        }
    }
}

#[derive(Debug, Serialize)]
struct InspectReport {
    transactions: usize,
    scale: String,
    lp_width: usize,
    lp_aligned: bool,
    misaligned_fields: Vec<&'static str>,
    charts: Vec<ChartRow>,
    fields: Vec<FieldRow>,
    summary: SimulationSummary,
}

impl InspectReport {
    fn new(dataset: &SimulationDataset) -> Self {
        Self {
            transactions: dataset.n,
            scale: dataset.scale.to_string(),
            lp_width: dataset.lp_distribution.width(),
            lp_aligned: dataset.lp_distribution.is_aligned(),
            misaligned_fields: dataset.misaligned_fields(),
            charts: ChartKind::iter()
                .map(|kind| ChartRow {
                    chart: kind.to_string(),
                    file: kind.file_stem(),
                    ready: dataset.chart_ready(kind),
                })
                .collect(),
            fields: dataset.conversion.iter().map(FieldRow::from).collect(),
            summary: SimulationSummary::from_dataset(dataset),
        }
    }

    fn print_tables(&self) {
        println!(
            "{} transactions, scale {}, {} LPs{}",
            self.transactions,
            self.scale,
            self.lp_width,
            if self.lp_aligned { "" } else { " (snapshots inconsistent)" }
        );
        println!("{}", self.summary.render_tables());
        println!("{}", Table::new(&self.charts).with(Style::rounded()));
        println!("{}", Table::new(&self.fields).with(Style::rounded()));
        if !self.misaligned_fields.is_empty() {
            println!("Misaligned with timestamps: {}", self.misaligned_fields.join(", "));
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let dataset = load_dataset(&args.input, args.decimals)?;
    let report = InspectReport::new(&dataset);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_tables();
    }
    Ok(())
}
