//! Atlas rendering: static scatter plots and frame-by-frame animations.

pub mod animation;
pub mod bounds;
pub mod canvas;
pub mod colormap;
pub mod sink;
pub mod static_plot;
pub mod style;

#[cfg(test)]
mod tests;

pub use animation::{render_animation, render_animation_to, AnimationState, AnimationSummary, Animator};
pub use bounds::AxisBounds;
pub use canvas::{Frame, Scene};
pub use colormap::ColorMap;
pub use sink::{FfmpegSink, FrameSink, MemorySink, PngSequenceSink};
pub use static_plot::{render_static, render_static_frame, StaticArtifact};
