//! # compass-atlas
//!
//! Calendar fields as points on the complex plane.
//!
//! Each discrete time component (year, month, day, hour, ..) is placed on its
//! own wheel as a *compass number* `r * e^(i * 2π * s / T)`. Summing one compass
//! per field gives an *atlas*: one complex coordinate per time sample, which
//! can then be drawn as a scatter plot or revealed point by point in a video.
//!
//! ```rust,ignore
//! use compass_atlas::prelude::*;
//!
//! let hours: Vec<i64> = (0..24).collect();
//! let atlas = AtlasComposer::new()
//!     .field("hour", hours.clone(), PeriodSpec::new(1.0, 24)?)
//!     .compose()?;
//!
//! let config = RenderConfig::default().with_output("readme/mod_24_clk.mp4");
//! render_animation(&atlas, &SymbolSequence::from_integers(&hours), &config)?;
//! ```

pub mod calendar;
pub mod composer;
pub mod config;
pub mod constants;
pub mod encoder;
pub mod error;
pub mod render;
pub mod types;

pub use composer::{compose, Atlas, AtlasComposer, FieldEncoding};
pub use config::{ExperimentConfig, RenderConfig};
pub use error::{AtlasError, Result};
pub use types::{PeriodSpec, Radius, Symbol, SymbolSequence, TimeIndex};

pub use num_complex::Complex64;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::calendar::{CalendarRadii, CalendarSeries, Frequency};
    pub use crate::composer::{compose, Atlas, AtlasComposer, FieldEncoding};
    pub use crate::config::{ColorScale, ExperimentConfig, LabelMode, RenderConfig, Reveal, SizeMode};
    pub use crate::encoder::{compass, encode, encode_signed, encode_spec};
    pub use crate::render::{render_animation, render_static, ColorMap};
    pub use crate::types::{PeriodSpec, Radius, Symbol, SymbolSequence, TimeIndex};
    pub use crate::{AtlasError, Complex64, Result};
}
