//! sv-render: draws line charts and their overlays to SVG.

pub mod draw;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sv_waves::LineChart;

pub use draw::{PALETTE, format_tick};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Chart has no data to draw")]
    EmptyChart,
}

/// Output canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Render `chart` as an SVG document held in memory.
pub fn render_svg_string(chart: &LineChart, opts: &RenderOptions) -> RenderResult<String> {
    let mut buf = String::new();
    {
        use plotters::prelude::*;
        let root = SVGBackend::with_string(&mut buf, (opts.width, opts.height)).into_drawing_area();
        draw::draw_chart(&root, chart)?;
        root.present().map_err(draw::draw_err)?;
    }
    Ok(buf)
}

/// Render `chart` to an `.svg` file.
pub fn render_chart(chart: &LineChart, path: &Path, opts: &RenderOptions) -> RenderResult<()> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if !is_svg {
        return Err(RenderError::UnsupportedFormat(path.display().to_string()));
    }

    let svg = render_svg_string(chart, opts)?;
    fs::write(path, svg)?;
    tracing::info!(
        path = %path.display(),
        series = chart.series.len(),
        shapes = chart.shapes.len(),
        annotations = chart.annotations.len(),
        "chart written"
    );
    Ok(())
}
