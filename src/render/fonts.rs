//! Runtime font registration.
//!
//! Bitmap text needs real glyph outlines. Rather than bundling a font, the first usable
//! system font is registered with plotters under [`FONT_FAMILY`]. Hosts without any
//! font (minimal containers, CI) still get their charts, just without titles, axis
//! labels or legends.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::FontStyle;

/// Family name every text style in the renderer refers to.
pub const FONT_FAMILY: &str = "sans-serif";

/// Environment variable naming a font file to use instead of the system search.
pub const FONT_ENV_VAR: &str = "DEX_CHARTS_FONT";

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSupport {
    /// A font is registered; titles, labels and legends are drawn.
    Enabled,
    /// No font available; charts are drawn without any text.
    Disabled,
}

impl TextSupport {
    pub fn enabled(&self) -> bool {
        matches!(self, TextSupport::Enabled)
    }
}

static TEXT_SUPPORT: OnceLock<TextSupport> = OnceLock::new();

/// Registers a font once per process and reports whether text can be drawn.
///
/// `preferred` is tried first, then `$DEX_CHARTS_FONT`, then well-known system paths.
/// Only the first call searches; later calls return the cached answer.
pub fn text_support(preferred: Option<&Path>) -> TextSupport {
    *TEXT_SUPPORT.get_or_init(|| {
        let from_env = std::env::var_os(FONT_ENV_VAR).map(PathBuf::from);
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(from_env)
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match register(&path) {
                Ok(()) => {
                    log::info!("Using font {:?} for chart text", path);
                    return TextSupport::Enabled;
                }
                Err(reason) => log::warn!("Skipping font {:?}: {}", path, reason),
            }
        }

        log::warn!(
            "No usable font found (set {} to a .ttf file); charts will be drawn without text",
            FONT_ENV_VAR
        );
        TextSupport::Disabled
    })
}

fn register(path: &Path) -> Result<(), String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    // plotters keeps registered fonts for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| "not a valid TrueType/OpenType font".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_answer_is_kept_for_the_process() {
        let first = text_support(None);
        let again = text_support(Some(Path::new("/nonexistent/other-font.ttf")));
        assert_eq!(first, again);
        assert_eq!(first.enabled(), again.enabled());
    }
}
