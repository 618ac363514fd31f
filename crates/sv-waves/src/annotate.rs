//! Duration bars and labels for detected waves.

use serde::{Deserialize, Serialize};
use sv_core::{SvResult, format_seconds, midpoint};

use crate::chart::{Annotation, ChartCanvas, Rgb, Shape, ShapeKind};
use crate::detect::Wave;

/// Placement and colour of the duration indicator.
///
/// The bar sits below the zero line, between `bar_y0` and `bar_y1`, with the
/// label centred on it at `label_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    pub bar_y0: f64,
    pub bar_y1: f64,
    pub label_y: f64,
    pub color: Rgb,
    pub line_width: u32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            bar_y0: -10.0,
            bar_y1: -20.0,
            label_y: -15.0,
            color: Rgb(0, 131, 184),
            line_width: 2,
        }
    }
}

/// Label text for a wave, e.g. `"2.0 sec"`.
pub fn duration_label(wave: &Wave) -> String {
    format!("{} sec", format_seconds(wave.duration_secs()))
}

/// Overlay one bar and one centred label per wave onto `chart`.
///
/// All primitives are computed before the chart is touched, so an error
/// leaves the chart unchanged.
pub fn render_annotations<C>(chart: &mut C, waves: &[Wave], style: &AnnotationStyle) -> SvResult<()>
where
    C: ChartCanvas + ?Sized,
{
    let mut overlays = Vec::with_capacity(waves.len());
    for wave in waves {
        let mid = midpoint(wave.start, wave.duration())?;
        let shape = Shape {
            kind: ShapeKind::Rect,
            x0: wave.start,
            x1: wave.end,
            y0: style.bar_y0,
            y1: style.bar_y1,
            line_color: style.color,
            line_width: style.line_width,
            fill: style.color,
        };
        let label = Annotation {
            x: mid,
            y: style.label_y,
            text: duration_label(wave),
            show_arrow: false,
        };
        overlays.push((shape, label));
    }

    for (shape, label) in overlays {
        chart.add_shape(shape);
        chart.add_annotation(label);
    }
    tracing::debug!(waves = waves.len(), "wave annotations added");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::LineChart;
    use sv_core::{Timestamp, from_epoch_seconds, parse_timestamp, total_seconds};

    fn t(v: f64) -> Timestamp {
        from_epoch_seconds(v).unwrap()
    }

    #[test]
    fn empty_waves_is_a_no_op() {
        let mut chart = LineChart::default();
        render_annotations(&mut chart, &[], &AnnotationStyle::default()).unwrap();
        assert_eq!(chart.shape_count(), 0);
        assert_eq!(chart.annotation_count(), 0);
    }

    #[test]
    fn one_bar_and_label_per_wave() {
        let waves = [
            Wave {
                start: t(1.0),
                end: t(3.0),
            },
            Wave {
                start: t(10.0),
                end: t(10.25),
            },
        ];
        let mut chart = LineChart::default();
        render_annotations(&mut chart, &waves, &AnnotationStyle::default()).unwrap();

        assert_eq!(chart.shape_count(), 2);
        assert_eq!(chart.annotation_count(), 2);

        let bar = &chart.shapes[0];
        assert_eq!((bar.x0, bar.x1), (t(1.0), t(3.0)));
        assert_eq!((bar.y0, bar.y1), (-10.0, -20.0));
        assert_eq!(bar.fill, Rgb(0, 131, 184));
        assert_eq!(bar.line_width, 2);

        let label = &chart.annotations[0];
        assert_eq!(label.x, t(2.0));
        assert_eq!(label.y, -15.0);
        assert_eq!(label.text, "2.0 sec");
        assert!(!label.show_arrow);

        assert_eq!(chart.annotations[1].text, "0.25 sec");
    }

    #[test]
    fn label_seconds_match_independent_difference() {
        let start = parse_timestamp("2024-09-20T09:18:16.678").unwrap();
        let end = parse_timestamp("2024-09-20T09:19:01.001").unwrap();
        let wave = Wave { start, end };
        let expected = total_seconds(end - start);
        let text = duration_label(&wave);
        let shown: f64 = text.trim_end_matches(" sec").parse().unwrap();
        assert_eq!(shown, expected);
        assert_eq!(text, "44.323 sec");
    }

    #[test]
    fn custom_style_is_applied() {
        let style = AnnotationStyle {
            bar_y0: -1.0,
            bar_y1: -2.0,
            label_y: -1.5,
            color: Rgb(200, 0, 100),
            line_width: 1,
        };
        let mut chart = LineChart::default();
        let waves = [Wave {
            start: t(0.0),
            end: t(4.0),
        }];
        render_annotations(&mut chart, &waves, &style).unwrap();
        assert_eq!(chart.shapes[0].line_color, Rgb(200, 0, 100));
        assert_eq!(chart.annotations[0].y, -1.5);
    }
}
