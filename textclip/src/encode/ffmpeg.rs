use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use image::RgbImage;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TextclipError, TextclipResult};

/// Options for [`FfmpegSink`] MP4 output. An existing file at `out_path` is replaced.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw `rgb24` frames to stdin.
///
/// Audio is optional and provided through `SinkConfig.audio`.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            last_idx: None,
        }
    }

    /// Output path this sink writes to.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }
}

/// Reject configurations `libx264`/`yuv420p` output cannot take.
pub fn validate_sink_config(cfg: &SinkConfig) -> TextclipResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(TextclipError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(TextclipError::validation(
            "ffmpeg sink width/height must be non-zero",
        ));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(TextclipError::validation(
            "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
        ));
    }
    if let Some(audio) = cfg.audio.as_ref() {
        if audio.sample_rate == 0 {
            return Err(TextclipError::validation(
                "audio sample_rate must be non-zero when audio is enabled",
            ));
        }
        if audio.channels == 0 {
            return Err(TextclipError::validation(
                "audio channels must be non-zero when audio is enabled",
            ));
        }
    }
    Ok(())
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> TextclipResult<()> {
        validate_sink_config(&cfg)?;

        ensure_parent_dir(&self.opts.out_path)?;

        let mut cmd = Command::new("ffmpeg");
        cmd.args(ffmpeg_args(&self.opts.out_path, &cfg))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(spawn_error)?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TextclipError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TextclipError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::info!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            audio = cfg.audio.is_some(),
            "ffmpeg encoder started"
        );
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> TextclipResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| TextclipError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(TextclipError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.dimensions() != (cfg.width, cfg.height) {
            return Err(TextclipError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(TextclipError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(frame.as_raw()).map_err(|e| {
            TextclipError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> TextclipResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| TextclipError::encode("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            TextclipError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| TextclipError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| TextclipError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(TextclipError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        tracing::info!(out = %self.opts.out_path.display(), "ffmpeg encoder finished");
        self.cfg = None;
        Ok(())
    }
}

/// Command line for encoding raw `rgb24` frames on stdin (plus optional `f32le` audio) to MP4.
pub fn ffmpeg_args(out_path: &Path, cfg: &SinkConfig) -> Vec<OsString> {
    let input = ["-y", "-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgb24"];
    let mut args: Vec<OsString> = input.into_iter().map(OsString::from).collect();
    // Rawvideo input takes its size and rate before `-i`.
    args.push("-s".into());
    args.push(format!("{}x{}", cfg.width, cfg.height).into());
    args.push("-r".into());
    args.push(format!("{}/{}", cfg.fps.num, cfg.fps.den).into());
    args.push("-i".into());
    args.push("pipe:0".into());

    let codec: &[&str] = match cfg.audio.as_ref() {
        Some(audio) => {
            args.push("-f".into());
            args.push("f32le".into());
            args.push("-ar".into());
            args.push(audio.sample_rate.to_string().into());
            args.push("-ac".into());
            args.push(audio.channels.to_string().into());
            args.push("-i".into());
            args.push(audio.path.clone().into_os_string());
            &["-c:v", "libx264", "-pix_fmt", "yuv420p", "-c:a", "aac", "-shortest"]
        }
        None => &["-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"],
    };
    args.extend(codec.iter().copied().map(OsString::from));
    args.push("-movflags".into());
    args.push("+faststart".into());
    args.push(out_path.as_os_str().to_owned());
    args
}

fn spawn_error(e: std::io::Error) -> TextclipError {
    if e.kind() == std::io::ErrorKind::NotFound {
        TextclipError::encode("ffmpeg is required for MP4 encoding, but was not found on PATH")
    } else {
        TextclipError::encode(format!("failed to spawn ffmpeg: {e}"))
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TextclipResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
