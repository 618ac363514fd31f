//! Load, chart, analyze and export.

use std::path::Path;

use sv_core::{Table, Timestamp, from_epoch_seconds, timestamp_from_cell};
use sv_render::render_chart;
use sv_waves::{LineChart, Series, Wave, XAxis, detect_waves, render_annotations};

use crate::config::{AppConfig, DedupPolicy};
use crate::error::{AppError, AppResult};
use crate::selection::ColumnSelection;

/// Request to build a chart from an input file.
pub struct VisualizeRequest<'a> {
    pub input_path: &'a Path,
    /// Explicit delimiter; sniffed from the configured ones when `None`.
    pub delimiter: Option<&'a str>,
    pub selection: ColumnSelection,
    pub config: &'a AppConfig,
}

/// Built chart plus what went into it.
#[derive(Debug, Clone)]
pub struct VisualizeResponse {
    pub chart: LineChart,
    /// Waves of the primary measure. Empty when durations are disabled.
    pub waves: Vec<Wave>,
    pub row_count: usize,
    pub duplicates_removed: usize,
}

/// Load an input file using the configured delimiters.
pub fn load_input(path: &Path, delimiter: Option<&str>, config: &AppConfig) -> AppResult<Table> {
    let explicit = delimiter.map(sv_io::parse_delimiter).transpose()?;
    let candidates = config.delimiter_bytes()?;
    Ok(sv_io::load_table(path, explicit, &candidates)?)
}

/// Apply the duplicate policy ahead of charting. Returns the rows removed.
pub fn prepare_table(table: &mut Table, policy: DedupPolicy, time_column: &str) -> AppResult<usize> {
    let removed = match policy {
        DedupPolicy::Rows => table.drop_duplicates(),
        DedupPolicy::Time => table.drop_duplicate_keys(time_column)?,
        DedupPolicy::None => 0,
    };
    if removed > 0 {
        tracing::info!(removed, policy = ?policy, "duplicate rows dropped");
    }
    Ok(removed)
}

/// One line series per selected measure against the parsed time column.
///
/// Blank or textual measure cells become gaps.
pub fn build_chart(table: &Table, selection: &ColumnSelection, title: &str) -> AppResult<LineChart> {
    selection.validate(table)?;
    let times = table
        .column_values(&selection.time_column)?
        .map(timestamp_from_cell)
        .collect::<Result<Vec<_>, _>>()?;
    chart_from_times(table, selection, title, times, XAxis::Time)
}

/// Same series as [`build_chart`], plotted against row position instead of
/// the time column.
pub fn build_position_chart(
    table: &Table,
    selection: &ColumnSelection,
    title: &str,
) -> AppResult<LineChart> {
    selection.validate(table)?;
    let times = (0..table.len())
        .map(|i| {
            from_epoch_seconds(i as f64)
                .ok_or_else(|| AppError::Data(format!("Row position {} out of range", i)))
        })
        .collect::<AppResult<Vec<_>>>()?;
    chart_from_times(table, selection, title, times, XAxis::Position)
}

fn chart_from_times(
    table: &Table,
    selection: &ColumnSelection,
    title: &str,
    times: Vec<Timestamp>,
    x_axis: XAxis,
) -> AppResult<LineChart> {
    let mut series = Vec::with_capacity(selection.measures.len());
    for measure in &selection.measures {
        let points = times
            .iter()
            .zip(table.column_values(measure)?)
            .map(|(&t, cell)| (t, cell.as_number().unwrap_or(f64::NAN)))
            .collect();
        series.push(Series {
            name: measure.clone(),
            points,
        });
    }

    let mut chart = LineChart::new(series);
    chart.layout.x_axis = x_axis;
    if !title.is_empty() {
        chart = chart.with_title(title);
    }
    Ok(chart)
}

/// Waves of the selection's primary measure.
pub fn analyze_waves(table: &Table, selection: &ColumnSelection) -> AppResult<Vec<Wave>> {
    let measure = selection
        .primary_measure()
        .ok_or_else(|| AppError::InvalidInput("Select at least one measure".to_string()))?;
    Ok(detect_waves(table, &selection.time_column, measure)?)
}

/// Run the full pipeline: load, de-duplicate, chart and (optionally) annotate.
pub fn visualize(request: &VisualizeRequest<'_>) -> AppResult<VisualizeResponse> {
    let config = request.config;
    let mut table = load_input(request.input_path, request.delimiter, config)?;
    request.selection.validate(&table)?;
    let duplicates_removed =
        prepare_table(&mut table, config.dedup, &request.selection.time_column)?;

    let mut chart = match build_chart(&table, &request.selection, &config.title) {
        Ok(chart) => chart,
        // Without duration bars the time column is only an axis.
        Err(AppError::Data(reason)) if !config.show_duration => {
            tracing::warn!(%reason, "time column not parseable, plotting by row position");
            build_position_chart(&table, &request.selection, &config.title)?
        }
        Err(err) => return Err(err),
    };

    let waves = if config.show_duration {
        let waves = analyze_waves(&table, &request.selection)?;
        render_annotations(&mut chart, &waves, &config.annotation)?;
        waves
    } else {
        Vec::new()
    };

    tracing::info!(
        rows = table.len(),
        measures = request.selection.measures.len(),
        waves = waves.len(),
        "chart built"
    );
    Ok(VisualizeResponse {
        chart,
        waves,
        row_count: table.len(),
        duplicates_removed,
    })
}

/// Write a chart to `path` with the configured canvas size.
pub fn export_chart(chart: &LineChart, path: &Path, config: &AppConfig) -> AppResult<()> {
    render_chart(chart, path, &config.render)?;
    Ok(())
}
