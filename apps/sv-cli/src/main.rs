use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use sv_app::{
    AppConfig, AppError, AppResult, ColumnSelection, DedupPolicy, VisualizeRequest, chart_service,
    describe_columns, load_config, measure_candidates, summarize_waves,
};
use sv_core::{Timestamp, format_seconds};
use sv_waves::duration_label;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sv-cli")]
#[command(about = "SheetViz CLI - Chart delimited data and annotate wave durations", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Optional YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the columns of an input file
    Columns {
        /// Path to the delimited input file
        input: PathBuf,
        /// Field delimiter (sniffed from the configured delimiters if omitted)
        #[arg(short, long)]
        delimiter: Option<String>,
        /// Show measure candidates once this column is used as time axis
        #[arg(long)]
        time: Option<String>,
    },
    /// Detect waves of one measure and print their durations
    Waves {
        /// Path to the delimited input file
        input: PathBuf,
        /// Time column
        #[arg(long)]
        time: String,
        /// Measure column to scan
        #[arg(long)]
        measure: String,
        /// Field delimiter (sniffed from the configured delimiters if omitted)
        #[arg(short, long)]
        delimiter: Option<String>,
        /// Keep duplicate rows
        #[arg(long)]
        no_dedup: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Render a line chart to SVG
    Plot {
        /// Path to the delimited input file
        input: PathBuf,
        /// Time column
        #[arg(long)]
        time: String,
        /// Measure columns (repeat for several); the first drives wave detection
        #[arg(long = "measure", required = true)]
        measures: Vec<String>,
        /// Output SVG path
        #[arg(short, long, default_value = "chart.svg")]
        output: PathBuf,
        /// Field delimiter (sniffed from the configured delimiters if omitted)
        #[arg(short, long)]
        delimiter: Option<String>,
        /// Do not annotate wave durations
        #[arg(long)]
        no_duration: bool,
        /// Chart title (defaults to the configured title)
        #[arg(long)]
        title: Option<String>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Columns {
            input,
            delimiter,
            time,
        } => cmd_columns(&input, delimiter.as_deref(), time.as_deref(), &config),
        Commands::Waves {
            input,
            time,
            measure,
            delimiter,
            no_dedup,
            json,
        } => cmd_waves(
            &input,
            &time,
            &measure,
            delimiter.as_deref(),
            no_dedup,
            json,
            &config,
        ),
        Commands::Plot {
            input,
            time,
            measures,
            output,
            delimiter,
            no_duration,
            title,
        } => {
            let mut config = config;
            if no_duration {
                config.show_duration = false;
            }
            if let Some(title) = title {
                config.title = title;
            }
            cmd_plot(
                &input,
                ColumnSelection::new(time, measures),
                &output,
                delimiter.as_deref(),
                &config,
            )
        }
    }
}

fn cmd_columns(
    input: &Path,
    delimiter: Option<&str>,
    time: Option<&str>,
    config: &AppConfig,
) -> AppResult<()> {
    let table = chart_service::load_input(input, delimiter, config)?;
    let columns = describe_columns(&table)?;

    println!("Columns in {} ({} rows):", input.display(), table.len());
    for col in &columns {
        println!("  {} ({})", col.name, col.kind.label());
    }

    if let Some(time) = time {
        if !table.has_column(time) {
            return Err(AppError::InvalidInput(format!(
                "Unknown time column: {}",
                time
            )));
        }
        println!("\nMeasure candidates:");
        for name in measure_candidates(&table, time) {
            println!("  {}", name);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct WaveRecord {
    start: Timestamp,
    end: Timestamp,
    duration_s: f64,
    label: String,
}

fn cmd_waves(
    input: &Path,
    time: &str,
    measure: &str,
    delimiter: Option<&str>,
    no_dedup: bool,
    json: bool,
    config: &AppConfig,
) -> AppResult<()> {
    let mut table = chart_service::load_input(input, delimiter, config)?;
    let selection = ColumnSelection::new(time, vec![measure.to_string()]);
    selection.validate(&table)?;

    let policy = if no_dedup {
        DedupPolicy::None
    } else {
        config.dedup
    };
    chart_service::prepare_table(&mut table, policy, time)?;
    let waves = chart_service::analyze_waves(&table, &selection)?;

    if json {
        let records: Vec<WaveRecord> = waves
            .iter()
            .map(|w| WaveRecord {
                start: w.start,
                end: w.end,
                duration_s: w.duration_secs(),
                label: duration_label(w),
            })
            .collect();
        let out = serde_json::to_string_pretty(&records)
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if waves.is_empty() {
        println!("No waves found in '{}'", measure);
        return Ok(());
    }

    println!("Waves in '{}' ({} found):", measure, waves.len());
    for (i, wave) in waves.iter().enumerate() {
        println!(
            "  {:>3}  {} -> {}  {}",
            i + 1,
            wave.start,
            wave.end,
            duration_label(wave)
        );
    }
    let summary = summarize_waves(&waves);
    println!(
        "\nTotal: {} sec, longest: {} sec, mean: {} sec",
        format_seconds(summary.total_s),
        format_seconds(summary.longest_s),
        format_seconds(summary.mean_s)
    );
    Ok(())
}

fn cmd_plot(
    input: &Path,
    selection: ColumnSelection,
    output: &Path,
    delimiter: Option<&str>,
    config: &AppConfig,
) -> AppResult<()> {
    let request = VisualizeRequest {
        input_path: input,
        delimiter,
        selection,
        config,
    };
    let response = chart_service::visualize(&request)?;
    chart_service::export_chart(&response.chart, output, config)?;

    println!("✓ Chart written to {}", output.display());
    println!("  Rows: {}", response.row_count);
    if response.duplicates_removed > 0 {
        println!("  Duplicates removed: {}", response.duplicates_removed);
    }
    println!("  Series: {}", response.chart.series.len());
    if config.show_duration {
        println!("  Waves annotated: {}", response.waves.len());
    }
    Ok(())
}
