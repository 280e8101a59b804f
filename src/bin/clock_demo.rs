use clap::Parser;
use compass_atlas::prelude::*;
use compass_atlas::render::{AnimationSummary, StaticArtifact};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mod 24 clocks: the hour of the day as a compass, with unit and log radii.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory for images and videos
    #[arg(long, default_value = compass_atlas::constants::filenames::DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// Write PNG frame directories instead of mp4 files (no ffmpeg needed)
    #[arg(long)]
    frames: bool,

    /// Skip the videos
    #[arg(long)]
    static_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs to stderr so stdout stays clean JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    fs::create_dir_all(&cli.out)?;
    let video = |name: &str| {
        if cli.frames {
            cli.out.join(name)
        } else {
            cli.out.join(format!("{}.mp4", name))
        }
    };

    let hours: Vec<i64> = (0..24).collect();
    let symbols = SymbolSequence::from_integers(&hours);

    let clock = Atlas::new(encode(&hours, &Radius::from(1.0), 24)?);
    let log_clock = Atlas::new(encode(&hours, &Radius::log_spiral(hours.len()), 24)?);

    let text_plot = RenderConfig {
        label_mode: LabelMode::Text,
        text_size: 12.0,
        show_colorbar: true,
        ..RenderConfig::default()
    };

    let mut images: Vec<StaticArtifact> = Vec::new();
    images.push(render_static(
        &clock,
        &symbols,
        &text_plot.clone().with_output(cli.out.join("mod_24_clk.png")),
    )?);
    images.push(render_static(
        &log_clock,
        &symbols,
        &RenderConfig {
            colormap: ColorMap::Brg,
            text_size: 10.0,
            ..text_plot.clone()
        }
        .with_output(cli.out.join("mod_24_log_clk.png")),
    )?);

    let mut videos: Vec<AnimationSummary> = Vec::new();
    if !cli.static_only {
        let marker_video = RenderConfig {
            size_mode: SizeMode::Variable,
            ..RenderConfig::default()
        };
        let text_video = RenderConfig {
            label_mode: LabelMode::MarkerAndText,
            ..marker_video.clone()
        };

        videos.push(render_animation(
            &log_clock,
            &symbols,
            &marker_video.with_output(video("mod_24_log_clk")),
        )?);
        videos.push(render_animation(
            &log_clock,
            &symbols,
            &text_video.clone().with_output(video("VAR_mod_24_log_clk")),
        )?);
        videos.push(render_animation(
            &clock,
            &symbols,
            &text_video.with_output(video("VAR_mod_24_clk")),
        )?);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "images": images, "videos": videos }))?
    );
    Ok(())
}
