use super::*;
use crate::composer::{Atlas, AtlasComposer};
use crate::config::{LabelMode, Reveal, RenderConfig, SizeMode};
use crate::encoder::encode;
use crate::error::AtlasError;
use crate::types::{PeriodSpec, Radius, SymbolSequence};
use std::time::Duration;

// No axes, captions or text; only the label test needs a system font.
fn headless(width: u32, height: u32) -> RenderConfig {
    RenderConfig {
        width,
        height,
        show_axes: false,
        label_mode: LabelMode::Marker,
        base_size: 3.0,
        alpha: 1.0,
        ..RenderConfig::default()
    }
}

fn clock(n: i64) -> Atlas {
    let idx: Vec<i64> = (0..n).collect();
    Atlas::new(encode(&idx, &Radius::from(1.0), 24).unwrap())
}

struct FailingSink {
    fail_at: usize,
    written: usize,
    finish_calls: usize,
}

impl FrameSink for FailingSink {
    fn write_frame(&mut self, _frame: &Frame, _timestamp: Duration) -> crate::Result<()> {
        if self.written == self.fail_at {
            return Err(AtlasError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "encoder went away",
            )));
        }
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> crate::Result<()> {
        self.finish_calls += 1;
        Ok(())
    }
}

#[test]
fn test_static_empty_atlas_draws_nothing() {
    let config = headless(64, 64);
    let frame = render_static_frame(&Atlas::default(), &SymbolSequence::default(), &config).unwrap();
    assert_eq!(frame.painted_pixels(config.background), 0);
}

#[test]
fn test_static_empty_atlas_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = headless(64, 64).with_output(dir.path().join("empty.png"));
    let artifact = render_static(&Atlas::default(), &SymbolSequence::default(), &config).unwrap();
    assert_eq!(artifact.points_drawn, 0);
    assert!(artifact.path.exists());
}

#[test]
fn test_static_draws_points() {
    let config = headless(64, 64);
    let atlas = clock(24);
    let frame = render_static_frame(&atlas, &SymbolSequence::sequential(24), &config).unwrap();
    assert_eq!(frame.rgb.len(), 64 * 64 * 3);
    assert!(frame.painted_pixels(config.background) > 0);
}

#[test]
fn test_static_unsupported_extension_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clock.mp4");
    let config = headless(64, 64).with_output(&path);
    let result = render_static(&clock(4), &SymbolSequence::sequential(4), &config);
    assert!(matches!(result, Err(AtlasError::InvalidConfig(_))));
    assert!(!path.exists());
}

#[test]
fn test_static_svg_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = headless(64, 64).with_output(dir.path().join("clock.svg"));
    let artifact = render_static(&clock(4), &SymbolSequence::sequential(4), &config).unwrap();
    let svg = std::fs::read_to_string(&artifact.path).unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(artifact.points_drawn, 4);
}

#[test]
fn test_text_labels_paint() {
    let atlas = clock(4);
    let symbols = SymbolSequence::from_integers(&[10, 11, 12, 13]);
    let marker = RenderConfig {
        base_size: 2.0,
        ..headless(96, 96)
    };
    let text = RenderConfig {
        label_mode: LabelMode::Text,
        text_size: 14.0,
        ..marker.clone()
    };
    let both = RenderConfig {
        label_mode: LabelMode::MarkerAndText,
        ..text.clone()
    };

    let bg = marker.background;
    let marker_px = render_static_frame(&atlas, &symbols, &marker)
        .unwrap()
        .painted_pixels(bg);
    let text_px = render_static_frame(&atlas, &symbols, &text)
        .unwrap()
        .painted_pixels(bg);
    let both_px = render_static_frame(&atlas, &symbols, &both)
        .unwrap()
        .painted_pixels(bg);

    assert!(text_px > 0);
    assert!(both_px > marker_px);
}

#[test]
fn test_static_length_mismatch() {
    let config = headless(64, 64);
    let result = render_static_frame(&clock(24), &SymbolSequence::sequential(23), &config);
    assert!(matches!(
        result,
        Err(AtlasError::LengthMismatch { expected: 24, actual: 23, .. })
    ));
}

#[test]
fn test_static_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = headless(64, 64).with_output(dir.path().join("nope").join("clock.png"));
    let result = render_static(&clock(4), &SymbolSequence::sequential(4), &config);
    assert!(matches!(result, Err(AtlasError::Io(_))));
}

#[test]
fn test_animation_one_frame_per_point() {
    let config = RenderConfig {
        fps: 1,
        ..headless(32, 32)
    };
    let mut sink = MemorySink::default();
    let summary =
        render_animation_to(&clock(24), &SymbolSequence::sequential(24), &config, &mut sink).unwrap();

    assert_eq!(summary.frames, 24);
    assert_eq!(summary.duration, Duration::from_secs(24));
    assert_eq!(sink.frames.len(), 24);
    assert_eq!(sink.finish_calls, 1);
    for (k, (ts, _)) in sink.frames.iter().enumerate() {
        assert_eq!(*ts, Duration::from_secs(k as u64));
    }
}

#[test]
fn test_cumulative_last_frame_matches_static_plot() {
    let config = headless(48, 48);
    let atlas = clock(12);
    let symbols = SymbolSequence::sequential(12);

    let mut sink = MemorySink::default();
    render_animation_to(&atlas, &symbols, &config, &mut sink).unwrap();
    let full = render_static_frame(&atlas, &symbols, &config).unwrap();

    let (_, last) = sink.frames.last().unwrap();
    assert_eq!(*last, full);

    // cumulative reveal only adds ink
    let first = sink.frames[0].1.painted_pixels(config.background);
    let last = last.painted_pixels(config.background);
    assert!(first > 0 && first < last);
}

#[test]
fn test_single_reveal_shows_one_point() {
    let config = RenderConfig {
        reveal: Reveal::Single,
        ..headless(48, 48)
    };
    let atlas = clock(12);
    let symbols = SymbolSequence::sequential(12);

    let mut sink = MemorySink::default();
    render_animation_to(&atlas, &symbols, &config, &mut sink).unwrap();

    let first = sink.frames[0].1.painted_pixels(config.background);
    let last = sink.frames[11].1.painted_pixels(config.background);
    let full = render_static_frame(&atlas, &symbols, &config)
        .unwrap()
        .painted_pixels(config.background);
    assert!(first > 0 && last > 0);
    assert!(last < full);
    assert_ne!(sink.frames[0].1, sink.frames[11].1);
}

#[test]
fn test_animation_empty_atlas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.mp4");
    let config = headless(32, 32).with_output(&path);

    let result = render_animation(&Atlas::default(), &SymbolSequence::default(), &config);
    assert!(matches!(result, Err(AtlasError::EmptyAtlas)));
    assert!(!path.exists());

    let mut sink = MemorySink::default();
    let result = render_animation_to(&Atlas::default(), &SymbolSequence::default(), &config, &mut sink);
    assert!(matches!(result, Err(AtlasError::EmptyAtlas)));
    assert_eq!(sink.finish_calls, 0);
}

#[test]
fn test_animation_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = headless(32, 32).with_output(dir.path().join("missing").join("clock.mp4"));
    let result = render_animation(&clock(4), &SymbolSequence::sequential(4), &config);
    assert!(matches!(result, Err(AtlasError::Io(_))));
}

#[test]
fn test_animation_to_png_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frames");
    let config = headless(32, 32).with_output(&out);
    let summary = render_animation(&clock(3), &SymbolSequence::sequential(3), &config).unwrap();
    assert_eq!(summary.frames, 3);
    assert!(out.join("frame_00002.png").exists());
}

#[test]
fn test_failed_frame_keeps_partial_output() {
    let config = headless(32, 32);
    let mut sink = FailingSink {
        fail_at: 5,
        written: 0,
        finish_calls: 0,
    };
    let result = render_animation_to(&clock(24), &SymbolSequence::sequential(24), &config, &mut sink);
    assert!(matches!(result, Err(AtlasError::Io(_))));
    assert_eq!(sink.written, 5);
    assert_eq!(sink.finish_calls, 1);
}

#[test]
fn test_state_machine_transitions() {
    let config = headless(32, 32);
    let atlas = clock(2);
    let scene = Scene::new(&atlas, &SymbolSequence::sequential(2), &config).unwrap();
    let mut animator = Animator::new(&scene, &config).unwrap();
    let mut sink = MemorySink::default();

    assert_eq!(animator.state(), AnimationState::Initialized);
    assert_eq!(animator.step(&mut sink).unwrap(), AnimationState::FrameEmitting(0));
    assert_eq!(animator.frames_written(), 0);
    assert_eq!(animator.step(&mut sink).unwrap(), AnimationState::FrameEmitting(1));
    assert_eq!(animator.frames_written(), 1);
    assert_eq!(animator.step(&mut sink).unwrap(), AnimationState::Finalized);
    assert_eq!(animator.frames_written(), 2);
    assert_eq!(animator.step(&mut sink).unwrap(), AnimationState::Finalized);
    assert_eq!(sink.frames.len(), 2);
    assert_eq!(sink.finish_calls, 1);
}

#[test]
fn test_bounds_fixed_from_full_atlas() {
    let config = headless(32, 32);
    let atlas = AtlasComposer::new()
        .field("hour", (0..48).collect(), PeriodSpec::new(1.0, 24).unwrap())
        .field("day", (0..48).map(|h| h / 24).collect(), PeriodSpec::new(3.0, 31).unwrap())
        .compose()
        .unwrap();
    let scene = Scene::new(&atlas, &SymbolSequence::sequential(48), &config).unwrap();
    assert!(atlas.xy().iter().all(|p| scene.bounds.contains(*p)));
    assert_eq!(scene.bounds.width(), scene.bounds.height());
}

#[test]
fn test_variable_sizes_paint_more() {
    let atlas = clock(24);
    let symbols = SymbolSequence::from_numbers(&[1.0; 24]);
    let small = RenderConfig {
        size_mode: SizeMode::Variable,
        ..headless(64, 64)
    };
    let big = RenderConfig {
        base_size: 6.0,
        ..small.clone()
    };
    let a = render_static_frame(&atlas, &symbols, &small).unwrap();
    let b = render_static_frame(&atlas, &symbols, &big).unwrap();
    assert!(b.painted_pixels([0, 0, 0]) > a.painted_pixels([0, 0, 0]));
}

#[test]
fn test_colorbar_paints_strip() {
    let config = RenderConfig {
        show_colorbar: true,
        ..headless(128, 64)
    };
    let frame = render_static_frame(&Atlas::default(), &SymbolSequence::default(), &config).unwrap();
    assert!(frame.painted_pixels(config.background) > 0);
}
