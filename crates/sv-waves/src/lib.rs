//! sv-waves: wave detection and chart annotation.
//!
//! A wave is a maximal run of rows whose measure value is strictly positive,
//! closed by the first following row that reads zero. Detection is a single
//! forward scan; annotation decorates a caller-supplied chart with one
//! duration bar and one label per wave.

pub mod annotate;
pub mod chart;
pub mod detect;

pub use annotate::{AnnotationStyle, duration_label, render_annotations};
pub use chart::{
    Annotation, ChartCanvas, Layout, LineChart, Rgb, Series, Shape, ShapeKind, XAxis,
};
pub use detect::{Wave, detect_waves};
