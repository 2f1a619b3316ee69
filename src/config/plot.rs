//! Plot visualization configuration

use plotters::style::RGBColor;

pub struct PlotConfig {
    /// Pixel size of the 3x2 overview figure
    pub combined_size: (u32, u32),
    /// Pixel size of each single-chart figure
    pub individual_size: (u32, u32),
    /// Title drawn above the overview grid
    pub combined_title: &'static str,

    pub background_color: RGBColor,
    pub placeholder_text_color: RGBColor,

    // --- LINE SERIES ---
    pub reserve_a_color: RGBColor,
    pub reserve_b_color: RGBColor,
    pub ratio_color: RGBColor,
    pub spot_price_color: RGBColor,
    pub volume_a_color: RGBColor,
    pub volume_b_color: RGBColor,
    pub fees_a_color: RGBColor,
    pub fees_b_color: RGBColor,
    pub line_width: u32,

    // --- SLIPPAGE MARKERS ---
    pub slippage_color: RGBColor,
    pub slippage_marker_size: u32,

    // --- LP STACK ---
    /// Gradient the per-LP area colors are sampled from
    pub lp_gradient_colors: &'static [&'static str],
    /// Opacity of each stacked LP area (0.0 = invisible, 1.0 = fully opaque)
    pub lp_fill_opacity: f64,
    /// Above this many LPs the legend is dropped to keep the panel readable
    pub lp_legend_max_entries: usize,

    /// Y-Axis Padding factor (e.g. 0.05 = 5% padding top and bottom)
    pub plot_y_padding_pct: f64,

    pub title_font_size: u32,
    pub caption_font_size: u32,
    pub label_font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    combined_size: (1500, 1800),
    individual_size: (1000, 600),
    combined_title: "DEX Simulation Results",

    background_color: RGBColor(255, 255, 255),
    placeholder_text_color: RGBColor(90, 90, 90),

    reserve_a_color: RGBColor(0, 0, 255),    // Blue
    reserve_b_color: RGBColor(255, 0, 0),    // Red
    ratio_color: RGBColor(0, 128, 0),        // Green
    spot_price_color: RGBColor(128, 128, 128),
    volume_a_color: RGBColor(128, 0, 128),   // Purple
    volume_b_color: RGBColor(165, 42, 42),   // Brown
    fees_a_color: RGBColor(0, 200, 200),     // Cyan (darkened so it shows on white)
    fees_b_color: RGBColor(255, 165, 0),     // Orange
    line_width: 2,

    slippage_color: RGBColor(255, 0, 255), // Magenta
    slippage_marker_size: 4,

    // Viridis-like ramp, low LP index (navy) to high (yellow)
    lp_gradient_colors: &[
        "#440154", // Dark purple
        "#3b528b", // Blue
        "#21918c", // Teal
        "#5ec962", // Green
        "#fde725", // Yellow
    ],
    lp_fill_opacity: 0.8,
    lp_legend_max_entries: 10,

    plot_y_padding_pct: 0.05,

    title_font_size: 32,
    caption_font_size: 24,
    label_font_size: 14,
    margin: 12,
    label_area_size: 60,
};
