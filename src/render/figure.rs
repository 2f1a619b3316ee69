//! Writes figures to disk: the 3x2 overview and one file per chart.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::analysis::SimulationDataset;
use crate::config::plot::PLOT_CONFIG;
use crate::config::{DF, PERSISTENCE, individual_chart_filename};
use crate::domain::ChartKind;
use crate::render::fonts::{FONT_FAMILY, TextSupport};
use crate::render::panels::{PanelContext, PanelOutcome, render_panel};
use crate::render::RenderError;
use crate::trace_time;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub output_dir: PathBuf,
    /// Also write one file per chart next to the overview
    pub individual: bool,
    pub text: TextSupport,
}

/// A figure that was written, with what each of its panels ended up showing.
#[derive(Debug, Clone)]
pub struct FigureReport {
    pub path: PathBuf,
    pub panels: Vec<(ChartKind, PanelOutcome)>,
}

impl FigureReport {
    pub fn placeholders(&self) -> impl Iterator<Item = ChartKind> + '_ {
        self.panels
            .iter()
            .filter(|(_, outcome)| *outcome == PanelOutcome::Placeholder)
            .map(|(kind, _)| *kind)
    }
}

#[derive(Debug)]
pub struct FigureFailure {
    pub path: PathBuf,
    pub error: RenderError,
}

#[derive(Debug, Default)]
pub struct RenderReport {
    pub written: Vec<FigureReport>,
    pub failed: Vec<FigureFailure>,
}

impl RenderReport {
    fn record(&mut self, path: PathBuf, result: Result<FigureReport, RenderError>) {
        match result {
            Ok(figure) => {
                if DF.log_figures {
                    log::info!("Saved {:?}", figure.path);
                }
                self.written.push(figure);
            }
            Err(error) => {
                log::error!("Failed to save {:?}: {}", path, error);
                self.failed.push(FigureFailure { path, error });
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn ensure_output_dir(dir: &Path) -> Result<(), RenderError> {
    std::fs::create_dir_all(dir).map_err(|source| RenderError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn combined_path(output_dir: &Path) -> PathBuf {
    output_dir.join(PERSISTENCE.output.combined_filename)
}

pub fn individual_path(output_dir: &Path, kind: ChartKind) -> PathBuf {
    output_dir.join(individual_chart_filename(kind.file_stem()))
}

/// Renders every figure. Only a missing, uncreatable output directory is fatal; a figure
/// that fails to draw or save is logged and listed in the report.
pub fn render_all(
    dataset: &SimulationDataset,
    options: &RenderOptions,
) -> Result<RenderReport, RenderError> {
    ensure_output_dir(&options.output_dir)?;
    log::info!("Generating plots...");

    let mut report = RenderReport::default();
    let combined = trace_time!("Render combined figure", 200_000, {
        render_combined(dataset, options)
    });
    report.record(combined_path(&options.output_dir), combined);

    if options.individual {
        let kinds: Vec<ChartKind> = ChartKind::iter().collect();
        let results: Vec<_> = trace_time!("Render individual figures", 500_000, {
            kinds
                .par_iter()
                .map(|&kind| {
                    (
                        individual_path(&options.output_dir, kind),
                        render_individual(kind, dataset, options),
                    )
                })
                .collect()
        });
        for (path, result) in results {
            report.record(path, result);
        }
    }

    Ok(report)
}

/// The overview: all six panels in a 3x2 grid under one title.
pub fn render_combined(
    dataset: &SimulationDataset,
    options: &RenderOptions,
) -> Result<FigureReport, RenderError> {
    let path = combined_path(&options.output_dir);
    let ctx = PanelContext {
        dataset,
        text: options.text,
    };

    let panels = {
        let root = BitMapBackend::new(&path, PLOT_CONFIG.combined_size).into_drawing_area();
        root.fill(&PLOT_CONFIG.background_color)?;

        let grid = if options.text.enabled() {
            root.titled(
                PLOT_CONFIG.combined_title,
                (FONT_FAMILY, PLOT_CONFIG.title_font_size),
            )?
        } else {
            root.clone()
        };

        let mut panels = Vec::with_capacity(6);
        for (kind, cell) in ChartKind::iter().zip(grid.split_evenly((3, 2)).iter()) {
            panels.push((kind, render_panel(kind, cell, &ctx)?));
        }
        root.present()?;
        panels
    };

    Ok(FigureReport { path, panels })
}

pub fn render_individual(
    kind: ChartKind,
    dataset: &SimulationDataset,
    options: &RenderOptions,
) -> Result<FigureReport, RenderError> {
    let path = individual_path(&options.output_dir, kind);
    let ctx = PanelContext {
        dataset,
        text: options.text,
    };

    let outcome = {
        let root = BitMapBackend::new(&path, PLOT_CONFIG.individual_size).into_drawing_area();
        root.fill(&PLOT_CONFIG.background_color)?;
        let outcome = render_panel(kind, &root, &ctx)?;
        root.present()?;
        outcome
    };

    Ok(FigureReport {
        path,
        panels: vec![(kind, outcome)],
    })
}
