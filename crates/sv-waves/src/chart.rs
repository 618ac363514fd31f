//! Line chart model and the canvas seam annotations are drawn onto.

use serde::{Deserialize, Serialize};
use sv_core::Timestamp;

/// Drawing surface that accepts overlay primitives keyed by axis coordinates.
pub trait ChartCanvas {
    fn add_shape(&mut self, shape: Shape);
    fn add_annotation(&mut self, annotation: Annotation);
    fn shape_count(&self) -> usize;
    fn annotation_count(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rect,
}

/// Filled shape spanning `[x0, x1]` in time and `[y0, y1]` in data units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub x0: Timestamp,
    pub x1: Timestamp,
    pub y0: f64,
    pub y1: f64,
    pub line_color: Rgb,
    pub line_width: u32,
    pub fill: Rgb,
}

/// Free text placed at a data coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: Timestamp,
    pub y: f64,
    pub text: String,
    pub show_arrow: bool,
}

/// One plotted measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<(Timestamp, f64)>,
}

/// What the x coordinates of a chart stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxis {
    /// Wall-clock time.
    #[default]
    Time,
    /// Row position, stored as whole seconds past the epoch.
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Y axis always includes zero.
    pub y_range_to_zero: bool,
    pub show_legend: bool,
    pub x_axis: XAxis,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            y_range_to_zero: true,
            show_legend: true,
            x_axis: XAxis::Time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineChart {
    pub title: Option<String>,
    pub series: Vec<Series>,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
    pub layout: Layout,
}

impl LineChart {
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Time extent over series points, shapes and annotations.
    pub fn x_bounds(&self) -> Option<(Timestamp, Timestamp)> {
        let xs = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.0))
            .chain(self.shapes.iter().flat_map(|s| [s.x0, s.x1]))
            .chain(self.annotations.iter().map(|a| a.x));
        let mut bounds: Option<(Timestamp, Timestamp)> = None;
        for x in xs {
            bounds = Some(match bounds {
                None => (x, x),
                Some((lo, hi)) => (lo.min(x), hi.max(x)),
            });
        }
        bounds
    }

    /// Y extent over finite series values, shapes and annotations, widened
    /// to include zero when the layout asks for it.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .chain(self.shapes.iter().flat_map(|s| [s.y0, s.y1]))
            .chain(self.annotations.iter().map(|a| a.y))
            .filter(|y| y.is_finite());
        let mut bounds: Option<(f64, f64)> = None;
        for y in ys {
            bounds = Some(match bounds {
                None => (y, y),
                Some((lo, hi)) => (lo.min(y), hi.max(y)),
            });
        }
        match bounds {
            Some((lo, hi)) if self.layout.y_range_to_zero => Some((lo.min(0.0), hi.max(0.0))),
            other => other,
        }
    }
}

impl ChartCanvas for LineChart {
    fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn annotation_count(&self) -> usize {
        self.annotations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::from_epoch_seconds;

    fn t(v: f64) -> Timestamp {
        from_epoch_seconds(v).unwrap()
    }

    #[test]
    fn empty_chart_has_no_bounds() {
        let chart = LineChart::default();
        assert!(chart.x_bounds().is_none());
        assert!(chart.y_bounds().is_none());
    }

    #[test]
    fn y_bounds_include_zero_and_overlays() {
        let mut chart = LineChart::new(vec![Series {
            name: "flow".into(),
            points: vec![(t(0.0), 4.0), (t(1.0), 9.0), (t(2.0), f64::NAN)],
        }]);
        assert_eq!(chart.y_bounds(), Some((0.0, 9.0)));

        chart.add_annotation(Annotation {
            x: t(5.0),
            y: -15.0,
            text: "1.0 sec".into(),
            show_arrow: false,
        });
        assert_eq!(chart.y_bounds(), Some((-15.0, 9.0)));
        assert_eq!(chart.x_bounds(), Some((t(0.0), t(5.0))));
    }

    #[test]
    fn css_color() {
        assert_eq!(Rgb(0, 131, 184).css(), "rgb(0,131,184)");
    }
}
