//! Chart rendering: one panel per `ChartKind`, a 3x2 overview figure and one PNG per chart.
mod error;
mod figure;
mod fonts;
mod panels;

pub use error::RenderError;
pub use figure::{
    FigureFailure, FigureReport, RenderOptions, RenderReport, combined_path, ensure_output_dir,
    individual_path, render_all, render_combined, render_individual,
};
pub use fonts::{FONT_ENV_VAR, FONT_FAMILY, TextSupport, text_support};
pub use panels::{ChartPanel, PanelContext, PanelOutcome, render_panel};
