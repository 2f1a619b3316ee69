use std::io;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw chart: {0}")]
    Draw(String),

    #[error("failed to build LP color palette: {0}")]
    Palette(String),

    #[error("failed to create output directory {path:?}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// Backend errors are generic over the drawing backend; keep only the message so the
// error stays Send and backend-agnostic.
impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}
