use anyhow::{anyhow, bail, Context};
use clap::{Parser, ValueEnum};
use compass_atlas::calendar::parse_timestamp;
use compass_atlas::constants::filenames::{DEFAULT_EXPERIMENT_FILE, DEFAULT_OUTPUT_DIR};
use compass_atlas::prelude::*;
use serde_json::json;
use std::f64::consts::TAU;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Calendar atlas: year, month, day and hour compasses summed per sample.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Experiment file (fields, time range, render style); defaults when missing
    #[arg(long, default_value = DEFAULT_EXPERIMENT_FILE)]
    config: PathBuf,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// Output file stem
    #[arg(long, default_value = "calendar_atlas")]
    name: String,

    /// What each point shows
    #[arg(long, value_enum, default_value_t = SymbolKind::Hour)]
    symbol: SymbolKind,

    /// Samples to draw, counted from the start of the series
    #[arg(long, default_value_t = 48)]
    limit: usize,

    /// Use nested radii (24, 12, 3, 1) instead of the configured ones
    #[arg(long)]
    nested: bool,

    /// Write a PNG frame directory instead of an mp4 file
    #[arg(long)]
    frames: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SymbolKind {
    /// Hour of the day
    Hour,
    /// Running sample index
    Index,
    /// cos(2π n / 24), rounded to 2 decimals
    Cosine,
    /// Phase of the atlas point, rounded to 4 decimals
    Angle,
}

fn field_values(series: &CalendarSeries, name: &str) -> anyhow::Result<Vec<i64>> {
    Ok(match name {
        "year" => series.relative_years(),
        "month" => series.month.clone(),
        "day" => series.day.clone(),
        // running sample index, as in the calendar preset
        "hour" | "index" => series.index.as_slice().to_vec(),
        "minute" => series.minute.clone(),
        "second" => series.second.clone(),
        other => bail!("unknown calendar field '{}'", other),
    })
}

fn symbols_for(kind: SymbolKind, series: &CalendarSeries, atlas: &Atlas) -> SymbolSequence {
    let n = atlas.len();
    match kind {
        SymbolKind::Hour => SymbolSequence::from_integers(&series.hour[..n]),
        SymbolKind::Index => SymbolSequence::sequential(n),
        SymbolKind::Cosine => {
            let values: Vec<f64> = (0..n).map(|k| (TAU * k as f64 / 24.0).cos()).collect();
            SymbolSequence::from_f64_rounded(&values, 2)
        }
        SymbolKind::Angle => SymbolSequence::from_f64_rounded(&atlas.angles(), 4),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut experiment = ExperimentConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let series = CalendarSeries::generate(
        parse_timestamp(&experiment.series.start)?,
        parse_timestamp(&experiment.series.end)?,
        experiment.series.frequency,
    )?;
    info!(samples = series.len(), years = series.year_span(), "Calendar series ready");

    let full = if cli.nested {
        series.atlas(&CalendarRadii::nested())?
    } else {
        let mut composer = AtlasComposer::new();
        for field in &experiment.fields {
            composer.push(FieldEncoding::new(
                field.name.clone(),
                field_values(&series, &field.name)?,
                field.to_spec()?,
            ));
        }
        composer.compose()?
    };
    if full.is_empty() {
        return Err(anyhow!("no samples between {} and {}", experiment.series.start, experiment.series.end));
    }

    let atlas = full.slice(0..cli.limit.min(full.len()));
    let symbols = symbols_for(cli.symbol, &series, &atlas);

    fs::create_dir_all(&cli.out)?;
    let render = &mut experiment.render;
    if let SymbolKind::Hour = cli.symbol {
        render.color_scale = ColorScale::Periodic { period: 24 };
    }

    let image = render_static(
        &atlas,
        &symbols,
        &render.clone().with_output(cli.out.join(format!("{}.png", cli.name))),
    )?;

    let video_path = if cli.frames {
        cli.out.join(&cli.name)
    } else {
        cli.out.join(format!("{}.mp4", cli.name))
    };
    let video = render_animation(&atlas, &symbols, &render.clone().with_output(video_path))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "samples": series.len(),
            "drawn": atlas.len(),
            "image": image,
            "video": video,
        }))?
    );
    Ok(())
}
