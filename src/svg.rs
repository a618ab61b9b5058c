// 🎨 Chart Rendering - BarChart → inline SVG via plotters
// Each chart is drawn into its own String through SVGBackend. Category labels
// are placed under the axis by hand so grouped bars can share one slot.

use crate::charts::{BarChart, Rgb};
use crate::error::{PipelineError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Display;

pub const CHART_WIDTH: u32 = 600;

const FONT: &str = "sans-serif";
const MARGIN: u32 = 15;
const X_LABEL_AREA: u32 = 150;
const Y_LABEL_AREA: u32 = 70;
const BAR_FILL_RATIO: f64 = 0.8;
const FALLBACK_COLOR: Rgb = Rgb(0x99, 0x99, 0x99);
const MUTED: RGBColor = RGBColor(0x88, 0x88, 0x88);

/// Escape text for use in HTML content and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Round up to 1, 2 or 5 times a power of ten.
fn nice_ceiling(value: f64) -> f64 {
    if !(value > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let step = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

fn render_failed(chart: &BarChart, err: impl Display) -> PipelineError {
    PipelineError::Render {
        chart: chart.id,
        message: err.to_string(),
    }
}

/// Render one chart as a standalone `<svg>` element.
/// Empty charts keep their axes and show a "No data" placeholder.
pub fn render_chart(chart: &BarChart) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, chart.height))
            .into_drawing_area();
        draw_chart(&root, chart)?;
        root.present().map_err(|e| render_failed(chart, e))?;
    }
    Ok(svg)
}

fn draw_chart(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &BarChart) -> Result<()> {
    root.fill(&WHITE).map_err(|e| render_failed(chart, e))?;

    let slots = chart.categories.len().max(1) as f64;
    let y_max = nice_ceiling(chart.max_value());
    let tick_decimals: usize = if y_max < 5.0 { 1 } else { 0 };

    let mut ctx = ChartBuilder::on(root)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(0f64..slots, 0f64..y_max)
        .map_err(|e| render_failed(chart, e))?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|v| format!("{:.*}", tick_decimals, v))
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .label_style((FONT, 11))
        .axis_desc_style((FONT, 12))
        .draw()
        .map_err(|e| render_failed(chart, e))?;

    if chart.is_empty() {
        let placeholder = (FONT, 14)
            .into_font()
            .color(&MUTED)
            .pos(Pos::new(HPos::Center, VPos::Center));
        ctx.draw_series(std::iter::once(Text::new(
            "No data",
            (slots / 2.0, y_max / 2.0),
            placeholder,
        )))
        .map_err(|e| render_failed(chart, e))?;
        return Ok(());
    }

    // Bars: each category owns [i, i + 1); grouped series split its middle
    let bar_width = BAR_FILL_RATIO / chart.series.len().max(1) as f64;
    let group_offset = (1.0 - BAR_FILL_RATIO) / 2.0;

    for (si, series) in chart.series.iter().enumerate() {
        let bars = series.values.iter().enumerate().filter_map(|(ci, value)| {
            let value = (*value)?;
            let x0 = ci as f64 + group_offset + bar_width * si as f64;
            let color = RGBColor::from(series.color_at(ci).unwrap_or(FALLBACK_COLOR));
            Some(Rectangle::new([(x0, 0.0), (x0 + bar_width, value)], color.filled()))
        });

        let drawn = ctx.draw_series(bars).map_err(|e| render_failed(chart, e))?;

        if let Some(name) = &series.name {
            let color = RGBColor::from(series.color_at(0).unwrap_or(FALLBACK_COLOR));
            drawn
                .label(name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
    }

    // Category labels, rotated to read downward from the axis
    let label_style = (FONT, 11)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (ci, category) in chart.categories.iter().enumerate() {
        let (x, y) = ctx.backend_coord(&(ci as f64 + 0.5, 0.0));
        root.draw(&Text::new(category.as_str(), (x, y + 6), label_style.clone()))
            .map_err(|e| render_failed(chart, e))?;
    }

    if chart.has_legend() {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&RGBColor(0xcc, 0xcc, 0xcc))
            .label_font((FONT, 11))
            .draw()
            .map_err(|e| render_failed(chart, e))?;
    }

    Ok(())
}
