//! Frame sinks: where animation frames go.

use crate::constants::filenames::FRAME_PREFIX;
use crate::error::{AtlasError, Result};
use crate::render::canvas::Frame;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::time::Duration;
use tracing::{debug, warn};

/// Accepts frames in order, then is finished once.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Frame, timestamp: Duration) -> Result<()>;

    /// Flush and close. Called exactly once per render.
    fn finish(&mut self) -> Result<()>;
}

/// Streams raw RGB frames into a system `ffmpeg` process.
pub struct FfmpegSink {
    path: PathBuf,
    width: u32,
    height: u32,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
}

pub fn ffmpeg_args(path: &Path, width: u32, height: u32, fps: u32) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "rawvideo".to_string(),
        "-pix_fmt".to_string(),
        "rgb24".to_string(),
        "-s".to_string(),
        format!("{}x{}", width, height),
        "-r".to_string(),
        fps.to_string(),
        "-i".to_string(),
        "-".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        path.display().to_string(),
    ]
}

impl FfmpegSink {
    pub fn open(path: &Path, width: u32, height: u32, fps: u32) -> Result<Self> {
        // Fails here, not inside ffmpeg, when the path is not writable
        File::create(path)?;

        let mut child = Command::new("ffmpeg")
            .args(ffmpeg_args(path, width, height, fps))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    AtlasError::Encoder("ffmpeg not found on PATH".to_string())
                }
                _ => AtlasError::Io(e),
            })?;
        let stdin = child.stdin.take();

        debug!(path = %path.display(), width, height, fps, "Spawned ffmpeg");
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            child: Some(child),
            stdin,
        })
    }
}

fn check_dims(frame: &Frame, width: u32, height: u32) -> Result<()> {
    if frame.width != width || frame.height != height {
        return Err(AtlasError::Encoder(format!(
            "frame is {}x{}, sink expects {}x{}",
            frame.width, frame.height, width, height
        )));
    }
    Ok(())
}

impl FrameSink for FfmpegSink {
    fn write_frame(&mut self, frame: &Frame, _timestamp: Duration) -> Result<()> {
        check_dims(frame, self.width, self.height)?;
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| AtlasError::Encoder("ffmpeg input already closed".to_string()))?;
        stdin.write_all(&frame.rgb)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // EOF on stdin tells ffmpeg to write the trailer
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return Ok(());
        };
        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(path = %self.path.display(), %stderr, "ffmpeg failed");
            return Err(AtlasError::Encoder(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// One numbered PNG per frame in a directory.
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
}

impl PngSequenceSink {
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: 0,
        })
    }

    pub fn frame_path(&self, k: usize) -> PathBuf {
        self.dir.join(format!("{}{:05}.png", FRAME_PREFIX, k))
    }
}

impl FrameSink for PngSequenceSink {
    fn write_frame(&mut self, frame: &Frame, _timestamp: Duration) -> Result<()> {
        let image = image::RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone())
            .ok_or_else(|| AtlasError::Encoder("frame buffer has the wrong size".to_string()))?;
        image
            .save(self.frame_path(self.written))
            .map_err(AtlasError::encoder)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        debug!(dir = %self.dir.display(), frames = self.written, "PNG sequence complete");
        Ok(())
    }
}

/// Keeps frames in memory; useful for previews and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<(Duration, Frame)>,
    pub finish_calls: usize,
}

impl FrameSink for MemorySink {
    fn write_frame(&mut self, frame: &Frame, timestamp: Duration) -> Result<()> {
        self.frames.push((timestamp, frame.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finish_calls += 1;
        Ok(())
    }
}

/// Container formats handed to ffmpeg; any other path is a PNG frame directory.
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "mov", "avi", "webm"];

pub fn is_video_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| VIDEO_EXTENSIONS.iter().any(|v| e.eq_ignore_ascii_case(v)))
}

/// Sink for `path`: ffmpeg for video extensions, a PNG directory otherwise.
pub fn open_sink(path: &Path, width: u32, height: u32, fps: u32) -> Result<Box<dyn FrameSink>> {
    if is_video_path(path) {
        Ok(Box::new(FfmpegSink::open(path, width, height, fps)?))
    } else {
        Ok(Box::new(PngSequenceSink::create(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> Frame {
        Frame {
            width,
            height,
            rgb: vec![0; (width * height * 3) as usize],
        }
    }

    #[test]
    fn test_ffmpeg_args() {
        let args = ffmpeg_args(Path::new("out/clock.mp4"), 640, 480, 2);
        let joined = args.join(" ");
        assert!(joined.contains("-s 640x480"));
        assert!(joined.contains("-r 2"));
        assert!(joined.contains("-pix_fmt rgb24"));
        assert_eq!(args.last().map(String::as_str), Some("out/clock.mp4"));
    }

    #[test]
    fn test_ffmpeg_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("clock.mp4");
        assert!(matches!(
            FfmpegSink::open(&path, 64, 64, 1),
            Err(AtlasError::Io(_))
        ));
    }

    #[test]
    fn test_png_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frames");
        let mut sink = PngSequenceSink::create(&out).unwrap();
        sink.write_frame(&blank(8, 4), Duration::ZERO).unwrap();
        sink.write_frame(&blank(8, 4), Duration::from_secs(1)).unwrap();
        sink.finish().unwrap();

        assert!(out.join("frame_00000.png").exists());
        assert!(out.join("frame_00001.png").exists());
        use image::GenericImageView;
        let img = image::open(out.join("frame_00001.png")).unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
    }

    #[test]
    fn test_png_rejects_bad_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngSequenceSink::create(dir.path()).unwrap();
        let bad = Frame {
            width: 8,
            height: 8,
            rgb: vec![0; 10],
        };
        assert!(matches!(
            sink.write_frame(&bad, Duration::ZERO),
            Err(AtlasError::Encoder(_))
        ));
    }

    #[test]
    fn test_video_path_detection() {
        assert!(is_video_path(Path::new("a/b.MP4")));
        assert!(is_video_path(Path::new("clock.webm")));
        assert!(!is_video_path(Path::new("frames")));
        assert!(!is_video_path(Path::new("clock.png")));
    }
}
