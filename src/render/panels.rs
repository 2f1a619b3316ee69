use std::ops::Range;

use colorgrad::Gradient;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::SimulationDataset;
use crate::config::plot::PLOT_CONFIG;
use crate::domain::{ChartKind, FixedPointValue, TimeSeries};
use crate::render::RenderError;
use crate::render::fonts::{FONT_FAMILY, TextSupport};
use crate::utils::{axis_range, series_bounds, stack_layers};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Everything a panel needs to draw itself.
pub struct PanelContext<'a> {
    pub dataset: &'a SimulationDataset,
    pub text: TextSupport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Drawn,
    /// Data was missing or misaligned; an explanatory placeholder was drawn instead
    Placeholder,
}

pub trait ChartPanel {
    fn kind(&self) -> ChartKind;

    /// Draws the chart. Only called when the dataset is ready for this kind.
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ctx: &PanelContext,
    ) -> Result<(), RenderError>;

    fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ctx: &PanelContext,
    ) -> Result<PanelOutcome, RenderError> {
        let kind = self.kind();
        if !ctx.dataset.chart_ready(kind) {
            draw_placeholder(area, kind, ctx.text)?;
            return Ok(PanelOutcome::Placeholder);
        }
        self.draw(area, ctx)?;
        Ok(PanelOutcome::Drawn)
    }
}

/// Renders the panel for `kind` onto `area`.
pub fn render_panel<DB: DrawingBackend>(
    kind: ChartKind,
    area: &DrawingArea<DB, Shift>,
    ctx: &PanelContext,
) -> Result<PanelOutcome, RenderError> {
    match kind {
        ChartKind::Reserves => ReservesPanel.render(area, ctx),
        ChartKind::RatioPrice => RatioPricePanel.render(area, ctx),
        ChartKind::Volume => VolumePanel.render(area, ctx),
        ChartKind::Slippage => SlippagePanel.render(area, ctx),
        ChartKind::Fees => FeesPanel.render(area, ctx),
        ChartKind::LpDistribution => LpDistributionPanel.render(area, ctx),
    }
}

// ============================================================================
// 1. RESERVES
// ============================================================================
pub struct ReservesPanel;

impl ChartPanel for ReservesPanel {
    fn kind(&self) -> ChartKind {
        ChartKind::Reserves
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ctx: &PanelContext,
    ) -> Result<(), RenderError> {
        let ds = ctx.dataset;
        draw_lines(
            area,
            ctx,
            self.kind(),
            &[
                LineSpec::new("Reserve A", &ds.reserves_a, PLOT_CONFIG.reserve_a_color),
                LineSpec::new("Reserve B", &ds.reserves_b, PLOT_CONFIG.reserve_b_color),
            ],
        )
    }
}

// ============================================================================
// 2. RESERVE RATIO / SPOT PRICE
// ============================================================================
pub struct RatioPricePanel;

impl ChartPanel for RatioPricePanel {
    fn kind(&self) -> ChartKind {
        ChartKind::RatioPrice
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ctx: &PanelContext,
    ) -> Result<(), RenderError> {
        let ds = ctx.dataset;
        let mut lines = vec![LineSpec::new(
            "Reserve Ratio (B/A)",
            &ds.reserve_ratios,
            PLOT_CONFIG.ratio_color,
        )];

        let spot = &ds.spot_prices;
        if ds.series_aligned(&[&spot.series]) {
            lines.push(LineSpec::new(
                spot.quote.label(),
                &spot.series,
                PLOT_CONFIG.spot_price_color,
            ));
        } else {
            log::warn!("{} is misaligned; plotting the reserve ratio only", spot.quote.field());
        }

        draw_lines(area, ctx, self.kind(), &lines)
    }
}

// ============================================================================
// 3. SWAP VOLUME
// ============================================================================
pub struct VolumePanel;

impl ChartPanel for VolumePanel {
    fn kind(&self) -> ChartKind {
        ChartKind::Volume
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ctx: &PanelContext,
    ) -> Result<(), RenderError> {
        let ds = ctx.dataset;
        draw_lines(
            area,
            ctx,
            self.kind(),
            &[
                LineSpec::new("Token A Volume", &ds.volume_a, PLOT_CONFIG.volume_a_color),
                LineSpec::new("Token B Volume", &ds.volume_b, PLOT_CONFIG.volume_b_color),
            ],
        )
    }
}

// ============================================================================
// 4. SLIPPAGE (only swaps that recorded one)
// ============================================================================
pub struct SlippagePanel;

impl ChartPanel for SlippagePanel {
    fn kind(&self) -> ChartKind {
        ChartKind::Slippage
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ctx: &PanelContext,
    ) -> Result<(), RenderError> {
        let points: Vec<(f64, f64)> = ctx
            .dataset
            .slippages
            .iter()
            .map(|s| (s.index as f64, s.value.to_f64()))
            .collect();

        // Samples can sit beyond the timestamp axis when the slippage array is longer
        let last_index = points.iter().map(|&(x, _)| x).fold(0.0, f64::max);
        let x_max = last_index.max(ctx.dataset.n.saturating_sub(1) as f64);
        let ys: Vec<f64> = points.iter().map(|&(_, y)| y).collect();

        let kind = self.kind();
        let mut chart = build_chart(
            area,
            kind,
            ctx.text,
            axis_range(0.0, x_max, 0.0),
            y_axis(&ys),
        )?;

        let color = PLOT_CONFIG.slippage_color;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, PLOT_CONFIG.slippage_marker_size, color.filled())),
            )?
            .label("Slippage %")
            .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 8, y + 4)], color.filled()));

        draw_legend(&mut chart, ctx.text)
    }
}

// ============================================================================
// 5. FEES
// ============================================================================
pub struct FeesPanel;

impl ChartPanel for FeesPanel {
    fn kind(&self) -> ChartKind {
        ChartKind::Fees
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ctx: &PanelContext,
    ) -> Result<(), RenderError> {
        let ds = ctx.dataset;
        draw_lines(
            area,
            ctx,
            self.kind(),
            &[
                LineSpec::new("Fees Token A", &ds.fees_a, PLOT_CONFIG.fees_a_color),
                LineSpec::new("Fees Token B", &ds.fees_b, PLOT_CONFIG.fees_b_color),
            ],
        )
    }
}

// ============================================================================
// 6. LP DISTRIBUTION (stacked areas)
// ============================================================================
pub struct LpDistributionPanel;

impl ChartPanel for LpDistributionPanel {
    fn kind(&self) -> ChartKind {
        ChartKind::LpDistribution
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        ctx: &PanelContext,
    ) -> Result<(), RenderError> {
        let lp = &ctx.dataset.lp_distribution;
        let columns: Vec<Vec<f64>> = (0..lp.width())
            .filter_map(|entity| lp.entity_series(entity))
            .map(|series| series.iter().map(FixedPointValue::to_f64).collect())
            .collect();
        let layers = stack_layers(&columns);
        let top = layers.last().map(Vec::as_slice).unwrap_or_default();

        let kind = self.kind();
        let mut chart = build_chart(
            area,
            kind,
            ctx.text,
            x_axis(ctx.dataset.n),
            y_axis(top),
        )?;

        let gradient = colorgrad::GradientBuilder::new()
            .html_colors(PLOT_CONFIG.lp_gradient_colors)
            .build::<colorgrad::LinearGradient>()
            .map_err(|e| RenderError::Palette(e.to_string()))?;
        let span = columns.len().saturating_sub(1).max(1) as f32;

        for (k, pair) in layers.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            let style = to_rgb(gradient.at(k as f32 / span))
                .mix(PLOT_CONFIG.lp_fill_opacity)
                .filled();

            // Upper edge left to right, then lower edge back
            let mut outline: Vec<(f64, f64)> =
                upper.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect();
            outline.extend(lower.iter().enumerate().rev().map(|(i, &y)| (i as f64, y)));

            let anno = chart.draw_series(std::iter::once(Polygon::new(outline, style)))?;
            if k < PLOT_CONFIG.lp_legend_max_entries {
                anno.label(format!("User {}", k + 1))
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], style));
            }
        }

        draw_legend(&mut chart, ctx.text)
    }
}

// ============================================================================
// Shared drawing helpers
// ============================================================================

struct LineSpec<'a> {
    label: &'static str,
    series: &'a TimeSeries<FixedPointValue>,
    color: RGBColor,
}

impl<'a> LineSpec<'a> {
    fn new(label: &'static str, series: &'a TimeSeries<FixedPointValue>, color: RGBColor) -> Self {
        Self {
            label,
            series,
            color,
        }
    }
}

fn draw_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    ctx: &PanelContext,
    kind: ChartKind,
    lines: &[LineSpec],
) -> Result<(), RenderError> {
    let points: Vec<Vec<(f64, f64)>> = lines.iter().map(|l| l.series.to_points()).collect();
    let ys: Vec<f64> = points.iter().flatten().map(|&(_, y)| y).collect();

    let mut chart = build_chart(area, kind, ctx.text, x_axis(ctx.dataset.n), y_axis(&ys))?;

    for (line, points) in lines.iter().zip(points) {
        let color = line.color;
        chart
            .draw_series(LineSeries::new(
                points,
                color.stroke_width(PLOT_CONFIG.line_width),
            ))?
            .label(line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    draw_legend(&mut chart, ctx.text)
}

/// Cartesian chart over `x` and `y`. Caption, axis labels and grid need text, so they
/// are only drawn when a font is available.
fn build_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    kind: ChartKind,
    text: TextSupport,
    x: Range<f64>,
    y: Range<f64>,
) -> Result<Chart<'a, DB>, RenderError> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(PLOT_CONFIG.margin);
    if text.enabled() {
        builder
            .caption(kind.to_string(), (FONT_FAMILY, PLOT_CONFIG.caption_font_size))
            .x_label_area_size(PLOT_CONFIG.label_area_size)
            .y_label_area_size(PLOT_CONFIG.label_area_size);
    }

    let mut chart = builder.build_cartesian_2d(x, y)?;
    if text.enabled() {
        chart
            .configure_mesh()
            .x_desc(kind.x_label())
            .y_desc(kind.y_label())
            .label_style((FONT_FAMILY, PLOT_CONFIG.label_font_size))
            .draw()?;
    }
    Ok(chart)
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    text: TextSupport,
) -> Result<(), RenderError> {
    if !text.enabled() {
        return Ok(());
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(PLOT_CONFIG.background_color.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT_FAMILY, PLOT_CONFIG.label_font_size))
        .draw()?;
    Ok(())
}

/// Titled panel with a centered explanation, or a framed cross when text is unavailable.
fn draw_placeholder<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    kind: ChartKind,
    text: TextSupport,
) -> Result<(), RenderError> {
    let color = PLOT_CONFIG.placeholder_text_color;

    if text.enabled() {
        let inner = area.titled(
            &kind.to_string(),
            (FONT_FAMILY, PLOT_CONFIG.caption_font_size),
        )?;
        let (w, h) = inner.dim_in_pixel();
        let style = TextStyle::from((FONT_FAMILY, PLOT_CONFIG.label_font_size).into_font())
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        inner.draw(&Text::new(
            kind.placeholder_text(),
            ((w / 2) as i32, (h / 2) as i32),
            style,
        ))?;
        return Ok(());
    }

    let (w, h) = area.dim_in_pixel();
    let (right, bottom) = (w.saturating_sub(1) as i32, h.saturating_sub(1) as i32);
    let stroke = color.stroke_width(PLOT_CONFIG.line_width);
    area.draw(&Rectangle::new([(0, 0), (right, bottom)], stroke))?;
    area.draw(&PathElement::new(vec![(0, 0), (right, bottom)], stroke))?;
    area.draw(&PathElement::new(vec![(0, bottom), (right, 0)], stroke))?;
    Ok(())
}

/// Transaction axis `0..n-1`.
fn x_axis(n: usize) -> Range<f64> {
    axis_range(0.0, n.saturating_sub(1) as f64, 0.0)
}

fn y_axis(values: &[f64]) -> Range<f64> {
    series_bounds(values)
        .map(|(min, max)| axis_range(min, max, PLOT_CONFIG.plot_y_padding_pct))
        .unwrap_or(0.0..1.0)
}

fn to_rgb(color: colorgrad::Color) -> RGBColor {
    let [r, g, b, _] = color.to_rgba8();
    RGBColor(r, g, b)
}
