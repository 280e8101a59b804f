//! Frame-by-frame animation of an atlas.
//!
//! `Initialized -> FrameEmitting(0) -> .. -> FrameEmitting(n - 1) -> Finalized`.
//! Axis bounds come from the full atlas and never change between frames. The
//! sink is finished exactly once, also when a frame fails; whatever it already
//! wrote stays on disk.

use crate::composer::Atlas;
use crate::config::{Reveal, RenderConfig};
use crate::error::{AtlasError, Result};
use crate::render::canvas::{render_frame, Scene};
use crate::render::sink::{open_sink, FrameSink};
use crate::types::SymbolSequence;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Initialized,
    /// Frame `k` is the next one to draw
    FrameEmitting(usize),
    Finalized,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationSummary {
    pub path: PathBuf,
    pub frames: usize,
    pub duration: Duration,
}

/// Timestamp of frame `k` at `fps` frames per second.
pub fn frame_timestamp(k: usize, fps: u32) -> Duration {
    Duration::from_secs_f64(k as f64 / fps.max(1) as f64)
}

pub struct Animator<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
    state: AnimationState,
    frames_written: usize,
}

impl<'a> Animator<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Result<Self> {
        if scene.is_empty() {
            return Err(AtlasError::EmptyAtlas);
        }
        Ok(Self {
            scene,
            config,
            state: AnimationState::Initialized,
            frames_written: 0,
        })
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    fn visible(&self, k: usize) -> RangeInclusive<usize> {
        match self.config.reveal {
            Reveal::Cumulative => 0..=k,
            Reveal::Single => k..=k,
        }
    }

    /// Advance one transition.
    pub fn step(&mut self, sink: &mut dyn FrameSink) -> Result<AnimationState> {
        match self.state {
            AnimationState::Initialized => {
                self.state = AnimationState::FrameEmitting(0);
            }
            AnimationState::FrameEmitting(k) => {
                if let Err(e) = self.emit(k, sink) {
                    self.abort(k, sink);
                    return Err(e);
                }
                if k + 1 < self.scene.len() {
                    self.state = AnimationState::FrameEmitting(k + 1);
                } else {
                    // not retried: a failed flush still ends in Finalized
                    self.state = AnimationState::Finalized;
                    sink.finish()?;
                }
            }
            AnimationState::Finalized => {}
        }
        Ok(self.state)
    }

    fn emit(&mut self, k: usize, sink: &mut dyn FrameSink) -> Result<()> {
        let frame = render_frame(self.scene, Some(self.visible(k)), self.config)?;
        sink.write_frame(&frame, frame_timestamp(k, self.config.fps))?;
        self.frames_written += 1;
        Ok(())
    }

    fn abort(&mut self, k: usize, sink: &mut dyn FrameSink) {
        self.state = AnimationState::Finalized;
        warn!(
            frame = k,
            written = self.frames_written,
            "Frame failed, keeping partial artifact"
        );
        if let Err(e) = sink.finish() {
            warn!(error = %e, "Flushing partial artifact failed");
        }
    }

    /// Step until `Finalized`.
    pub fn run(mut self, sink: &mut dyn FrameSink) -> Result<AnimationSummary> {
        while self.step(sink)? != AnimationState::Finalized {}
        Ok(AnimationSummary {
            path: self.config.output_path.clone(),
            frames: self.frames_written,
            duration: frame_timestamp(self.frames_written, self.config.fps),
        })
    }
}

/// Animate into a caller-provided sink.
pub fn render_animation_to(
    atlas: &Atlas,
    symbols: &SymbolSequence,
    config: &RenderConfig,
    sink: &mut dyn FrameSink,
) -> Result<AnimationSummary> {
    config.validate()?;
    if atlas.is_empty() {
        return Err(AtlasError::EmptyAtlas);
    }
    let scene = Scene::new(atlas, symbols, config)?;
    debug!(bounds = ?scene.bounds, frames = scene.len(), "Animation initialized");
    Animator::new(&scene, config)?.run(sink)
}

/// One frame per atlas point, written to `config.output_path` (a video file
/// for video extensions, otherwise a directory of PNG frames).
pub fn render_animation(
    atlas: &Atlas,
    symbols: &SymbolSequence,
    config: &RenderConfig,
) -> Result<AnimationSummary> {
    config.validate()?;
    if atlas.is_empty() {
        return Err(AtlasError::EmptyAtlas);
    }
    let scene = Scene::new(atlas, symbols, config)?;
    let mut sink = open_sink(&config.output_path, config.width, config.height, config.fps)?;

    let summary = Animator::new(&scene, config)?.run(sink.as_mut())?;
    info!(
        path = %summary.path.display(),
        frames = summary.frames,
        seconds = summary.duration.as_secs_f64(),
        "Animation written"
    );
    Ok(summary)
}
