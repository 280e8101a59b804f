//! Drawing one frame of an atlas onto a plotters drawing area.

use crate::composer::Atlas;
use crate::config::RenderConfig;
use crate::constants::render::FONT_FAMILY;
use crate::constants::{COLORBAR_GAP, COLORBAR_WIDTH};
use crate::error::{AtlasError, Result};
use crate::render::bounds::AxisBounds;
use crate::render::style::{point_styles, PointStyle};
use crate::types::SymbolSequence;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::RangeInclusive;

/// Everything needed to draw any frame of an atlas: coordinates, per-point
/// styles and axis bounds fixed from the full extent.
#[derive(Debug, Clone)]
pub struct Scene {
    pub points: Vec<(f64, f64)>,
    pub styles: Vec<PointStyle>,
    pub bounds: AxisBounds,
}

impl Scene {
    pub fn new(atlas: &Atlas, symbols: &SymbolSequence, config: &RenderConfig) -> Result<Self> {
        if symbols.len() != atlas.len() {
            return Err(AtlasError::length_mismatch("symbols", atlas.len(), symbols.len()));
        }
        let points = atlas.xy();
        let bounds = AxisBounds::for_points(&points, config.padding, config.equal_aspect);
        Ok(Self {
            styles: point_styles(symbols, config),
            points,
            bounds,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every point, as drawn by a static plot.
    pub fn all(&self) -> Option<RangeInclusive<usize>> {
        (!self.is_empty()).then(|| 0..=self.len() - 1)
    }
}

/// Packed RGB24 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Frame {
    /// Pixels differing from `background`.
    pub fn painted_pixels(&self, background: [u8; 3]) -> usize {
        self.rgb
            .chunks_exact(3)
            .filter(|px| px[..] != background[..])
            .count()
    }
}

fn rgb(c: [u8; 3]) -> RGBColor {
    RGBColor(c[0], c[1], c[2])
}

/// Draw the points in `visible` (none when `None`) onto `root`.
pub fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene,
    visible: Option<RangeInclusive<usize>>,
    config: &RenderConfig,
) -> Result<()> {
    let background = rgb(config.background);
    let foreground = rgb(config.foreground);
    root.fill(&background).map_err(AtlasError::encoder)?;

    let plot_area = if config.show_colorbar {
        let (width, _) = root.dim_in_pixel();
        let split = width.saturating_sub(COLORBAR_WIDTH + COLORBAR_GAP) as i32;
        let (plot, bar) = root.split_horizontally(split);
        draw_colorbar(&bar, config)?;
        plot
    } else {
        root.clone()
    };

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(10);
    if let Some(title) = &config.title {
        builder.caption(title, (FONT_FAMILY, 20).into_font().color(&foreground));
    }
    if config.show_axes {
        builder.x_label_area_size(30).y_label_area_size(40);
    }
    let b = scene.bounds;
    let mut chart = builder
        .build_cartesian_2d(b.x.0..b.x.1, b.y.0..b.y.1)
        .map_err(AtlasError::encoder)?;

    if config.show_axes {
        chart
            .configure_mesh()
            .axis_style(&foreground)
            .light_line_style(&foreground.mix(0.08))
            .bold_line_style(&foreground.mix(0.2))
            .label_style((FONT_FAMILY, 12).into_font().color(&foreground))
            .draw()
            .map_err(AtlasError::encoder)?;
    }

    let Some(visible) = visible else {
        return Ok(());
    };
    let shown = || visible.clone().map(|i| (scene.points[i], &scene.styles[i]));

    if config.label_mode.draws_marker() {
        chart
            .draw_series(shown().map(|(p, style)| {
                Circle::new(p, style.radius, style.color.mix(config.alpha).filled())
            }))
            .map_err(AtlasError::encoder)?;
    }

    if config.label_mode.draws_text() {
        let size = config.text_size;
        chart
            .draw_series(shown().map(|(p, style)| {
                let font = (FONT_FAMILY, size)
                    .into_font()
                    .color(&style.color)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                Text::new(style.label.clone(), p, font)
            }))
            .map_err(AtlasError::encoder)?;
    }

    Ok(())
}

/// Vertical gradient of the color map, 0 at the bottom.
fn draw_colorbar<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, config: &RenderConfig) -> Result<()> {
    let (_, height) = area.dim_in_pixel();
    if height == 0 {
        return Ok(());
    }
    let x0 = COLORBAR_GAP as i32;
    let x1 = (COLORBAR_GAP + COLORBAR_WIDTH) as i32;
    for row in 0..height {
        let t = 1.0 - row as f64 / (height.max(2) - 1) as f64;
        let y = row as i32;
        area.draw(&Rectangle::new(
            [(x0, y), (x1, y + 1)],
            config.colormap.color(t).filled(),
        ))
        .map_err(AtlasError::encoder)?;
    }
    Ok(())
}

/// Render into an in-memory RGB buffer.
pub fn render_frame(
    scene: &Scene,
    visible: Option<RangeInclusive<usize>>,
    config: &RenderConfig,
) -> Result<Frame> {
    let (width, height) = (config.width, config.height);
    let mut rgb = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        draw_scene(&root, scene, visible, config)?;
        root.present().map_err(AtlasError::encoder)?;
    }
    Ok(Frame { width, height, rgb })
}
