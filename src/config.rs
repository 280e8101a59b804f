use crate::constants::render::*;
use crate::error::{AtlasError, Result};
use crate::render::colormap::ColorMap;
use crate::types::PeriodSpec;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How symbols are normalized to `[0, 1]` before color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorScale {
    /// Linear between the smallest and largest symbol
    MinMax,
    /// `(value mod period) / period`
    Periodic { period: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMode {
    Uniform,
    /// Marker radius grows with the normalized symbol magnitude
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    Marker,
    Text,
    MarkerAndText,
}

impl LabelMode {
    pub fn draws_marker(self) -> bool {
        matches!(self, LabelMode::Marker | LabelMode::MarkerAndText)
    }

    pub fn draws_text(self) -> bool {
        matches!(self, LabelMode::Text | LabelMode::MarkerAndText)
    }
}

/// Which points a frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reveal {
    /// Points `0..=k`
    Cumulative,
    /// Only point `k`
    Single,
}

/// Style and output settings for one render call.
///
/// Passed by reference to every render; nothing is kept between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub colormap: ColorMap,
    pub color_scale: ColorScale,
    pub alpha: f64,
    pub width: u32,
    pub height: u32,
    pub size_mode: SizeMode,
    /// Marker radius in pixels
    pub base_size: f64,
    pub label_mode: LabelMode,
    pub text_size: f64,
    /// Fraction of the atlas span added on each side of the axes
    pub padding: f64,
    pub equal_aspect: bool,
    pub fps: u32,
    pub reveal: Reveal,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    pub show_axes: bool,
    pub show_colorbar: bool,
    pub title: Option<String>,
    pub output_path: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colormap: ColorMap::Hsv,
            color_scale: ColorScale::MinMax,
            alpha: DEFAULT_ALPHA,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            size_mode: SizeMode::Uniform,
            base_size: DEFAULT_BASE_SIZE,
            label_mode: LabelMode::Marker,
            text_size: DEFAULT_TEXT_SIZE,
            padding: DEFAULT_PADDING,
            equal_aspect: true,
            fps: DEFAULT_FPS,
            reveal: Reveal::Cumulative,
            // Dark theme: black figure, white text and ticks
            background: [0, 0, 0],
            foreground: [255, 255, 255],
            show_axes: true,
            show_colorbar: false,
            title: None,
            output_path: PathBuf::from("atlas.mp4"),
        }
    }
}

impl RenderConfig {
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(AtlasError::InvalidConfig(msg));

        if self.width == 0 || self.height == 0 {
            return invalid(format!("figure size {}x{} must be non-zero", self.width, self.height));
        }
        // yuv420p needs even dimensions
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return invalid(format!("figure size {}x{} must be even", self.width, self.height));
        }
        if self.fps == 0 {
            return invalid("fps must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return invalid(format!("alpha {} outside [0, 1]", self.alpha));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return invalid(format!("padding {} must be finite and non-negative", self.padding));
        }
        if !self.base_size.is_finite() || self.base_size <= 0.0 {
            return invalid(format!("base_size {} must be positive", self.base_size));
        }
        if !self.text_size.is_finite() || self.text_size <= 0.0 {
            return invalid(format!("text_size {} must be positive", self.text_size));
        }
        if let ColorScale::Periodic { period } = self.color_scale {
            if period <= 0 {
                return Err(AtlasError::InvalidPeriod { period });
            }
        }
        Ok(())
    }
}

/// One compass in an experiment file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default = "unit_radius")]
    pub radius: f64,
    /// Imaginary part of the radius; shifts the phase of the whole ring
    #[serde(default)]
    pub radius_im: f64,
    pub period: i64,
    #[serde(default)]
    pub negative_period: Option<i64>,
}

fn unit_radius() -> f64 {
    1.0
}

impl FieldConfig {
    pub fn to_spec(&self) -> Result<PeriodSpec> {
        let radius = Complex64::new(self.radius, self.radius_im);
        match self.negative_period {
            Some(negative) => PeriodSpec::signed(radius, self.period, negative),
            None => PeriodSpec::new(radius, self.period),
        }
    }
}

/// Time range sampled by an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub start: String,
    pub end: String,
    pub frequency: crate::calendar::Frequency,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            start: "2023-01-01 00:00:00".to_string(),
            end: "2029-12-31 23:00:00".to_string(),
            frequency: crate::calendar::Frequency::Hour,
        }
    }
}

/// Parameter set for one visualization run, read from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub series: SeriesConfig,
    pub fields: Vec<FieldConfig>,
    pub render: RenderConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        let field = |name: &str, period| FieldConfig {
            name: name.to_string(),
            radius: 1.0,
            radius_im: 0.0,
            period,
            negative_period: None,
        };
        Self {
            series: SeriesConfig::default(),
            fields: vec![
                field("year", 7),
                field("month", 12),
                field("day", 31),
                field("hour", 24),
            ],
            render: RenderConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Defaults when `path` does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.render.validate()?;
        Ok(config)
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }
}
