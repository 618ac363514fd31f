//! Backend-agnostic chart drawing.
//!
//! The time axis is drawn in seconds relative to the earliest x value and
//! labelled back in wall-clock form.

use chrono::TimeDelta;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sv_core::{Timestamp, total_seconds};
use sv_waves::{LineChart, Rgb, Series, ShapeKind, XAxis};

use crate::{RenderError, RenderResult};

/// Line colours, cycled per series.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
    RGBColor(255, 161, 90),
    RGBColor(25, 211, 243),
    RGBColor(255, 102, 146),
    RGBColor(182, 232, 128),
    RGBColor(255, 151, 255),
    RGBColor(254, 203, 82),
];

pub(crate) fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

/// Tick label for an offset (seconds) from `origin`. Precision follows the
/// visible span.
pub fn format_tick(origin: Timestamp, offset_s: f64, span_s: f64) -> String {
    let Some(t) = origin.checked_add_signed(TimeDelta::milliseconds((offset_s * 1e3).round() as i64))
    else {
        return format!("{:.0}", offset_s);
    };
    if span_s < 120.0 {
        t.format("%H:%M:%S%.3f").to_string()
    } else if span_s < 2.0 * 86_400.0 {
        t.format("%H:%M:%S").to_string()
    } else {
        t.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Split a series into runs of finite points so gaps stay gaps.
fn finite_runs(series: &Series, origin: Timestamp) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &(t, y) in &series.points {
        if y.is_finite() {
            current.push((total_seconds(t - origin), y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

pub(crate) fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &LineChart) -> RenderResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_lo, x_hi) = chart.x_bounds().ok_or(RenderError::EmptyChart)?;
    let (mut y_lo, mut y_hi) = chart.y_bounds().unwrap_or((0.0, 1.0));
    if y_hi - y_lo <= f64::EPSILON {
        y_lo -= 1.0;
        y_hi += 1.0;
    }
    let pad = (y_hi - y_lo) * 0.05;
    let origin = x_lo;
    let span = total_seconds(x_hi - x_lo).max(1.0e-3);

    root.fill(&WHITE).map_err(draw_err)?;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
    if let Some(title) = &chart.title {
        builder.caption(title, ("sans-serif", 24));
    }
    let mut ctx = builder
        .build_cartesian_2d(0.0..span, (y_lo - pad)..(y_hi + pad))
        .map_err(draw_err)?;

    let x_axis = chart.layout.x_axis;
    let x_fmt = move |v: &f64| match x_axis {
        XAxis::Time => format_tick(origin, *v, span),
        XAxis::Position => format!("{:.0}", v),
    };
    ctx.configure_mesh()
        .x_labels(8)
        .y_labels(8)
        .x_label_formatter(&x_fmt)
        .draw()
        .map_err(draw_err)?;

    for (i, series) in chart.series.iter().enumerate() {
        let line = PALETTE[i % PALETTE.len()];
        let mut labelled = false;
        for run in finite_runs(series, origin) {
            let anno = ctx
                .draw_series(LineSeries::new(run, line.stroke_width(2)))
                .map_err(draw_err)?;
            if !labelled {
                anno.label(series.name.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], line.stroke_width(2))
                });
                labelled = true;
            }
        }
    }

    for shape in &chart.shapes {
        match shape.kind {
            ShapeKind::Rect => {
                let corners = [
                    (total_seconds(shape.x0 - origin), shape.y0),
                    (total_seconds(shape.x1 - origin), shape.y1),
                ];
                ctx.draw_series(std::iter::once(Rectangle::new(
                    corners,
                    color(shape.fill).filled(),
                )))
                .map_err(draw_err)?;
                ctx.draw_series(std::iter::once(Rectangle::new(
                    corners,
                    color(shape.line_color).stroke_width(shape.line_width),
                )))
                .map_err(draw_err)?;
            }
        }
    }

    let label_style = TextStyle::from(("sans-serif", 14).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for annotation in &chart.annotations {
        let at = (total_seconds(annotation.x - origin), annotation.y);
        ctx.draw_series(std::iter::once(Text::new(
            annotation.text.clone(),
            at,
            label_style.clone(),
        )))
        .map_err(draw_err)?;
    }

    if chart.layout.show_legend && !chart.series.is_empty() {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_err)?;
    }
    Ok(())
}
