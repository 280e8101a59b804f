use crate::composer::Atlas;
use crate::config::RenderConfig;
use crate::error::{AtlasError, Result};
use crate::render::canvas::{draw_scene, render_frame, Frame, Scene};
use crate::types::SymbolSequence;
use plotters::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a static render wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticArtifact {
    pub path: PathBuf,
    pub points_drawn: usize,
}

/// Bitmap formats the plotting backend can encode.
const BITMAP_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

enum ImageFormat {
    Svg,
    Bitmap,
}

fn image_format(path: &Path) -> Result<ImageFormat> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if ext.eq_ignore_ascii_case("svg") {
        Ok(ImageFormat::Svg)
    } else if BITMAP_EXTENSIONS.iter().any(|b| ext.eq_ignore_ascii_case(b)) {
        Ok(ImageFormat::Bitmap)
    } else {
        Err(AtlasError::InvalidConfig(format!(
            "unsupported image format for {}: expected svg, png, jpg or bmp",
            path.display()
        )))
    }
}

/// Scatter plot of the whole atlas written to `config.output_path`
/// (SVG for a `.svg` extension, PNG/JPEG/BMP otherwise). Any other extension
/// is rejected before the file is touched.
///
/// An empty atlas is valid and produces a plot with no points.
pub fn render_static(
    atlas: &Atlas,
    symbols: &SymbolSequence,
    config: &RenderConfig,
) -> Result<StaticArtifact> {
    config.validate()?;
    let scene = Scene::new(atlas, symbols, config)?;
    let path = config.output_path.as_path();
    let format = image_format(path)?;

    // Surface an unwritable path as an IO error before any drawing happens
    File::create(path)?;

    let size = (config.width, config.height);
    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_scene(&root, &scene, scene.all(), config)?;
            root.present().map_err(AtlasError::encoder)?;
        }
        ImageFormat::Bitmap => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_scene(&root, &scene, scene.all(), config)?;
            root.present().map_err(AtlasError::encoder)?;
        }
    }

    info!(path = %path.display(), points = scene.len(), "Static atlas written");
    Ok(StaticArtifact {
        path: path.to_path_buf(),
        points_drawn: scene.len(),
    })
}

/// Same plot as [`render_static`], kept in memory.
pub fn render_static_frame(
    atlas: &Atlas,
    symbols: &SymbolSequence,
    config: &RenderConfig,
) -> Result<Frame> {
    config.validate()?;
    let scene = Scene::new(atlas, symbols, config)?;
    render_frame(&scene, scene.all(), config)
}
