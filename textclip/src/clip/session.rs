use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::assets::media::default_assets_dir;
use crate::audio::manifest::load_soundtrack;
use crate::audio::mix::{mix_manifest, write_mix_to_f32le_file};
use crate::clip::params::{Background, ClipParams};
use crate::effects::glitch::GlitchEffect;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{TextclipError, TextclipResult};
use crate::render::compose::{fade_factor, fade_in_place, over_premul_in_place};
use crate::render::gradient::{BackgroundClip, create_gradient_clip, solid_clip};
use crate::render::text::{CaptionLayer, expand_scale};
use crate::text::layout::TextLayoutEngine;
use crate::text::wrap::wrap_text_to_width;

/// Counters from one render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames the glitch filter modified.
    pub frames_glitched: u64,
}

/// A captioned clip ready to be rendered frame by frame.
pub struct TextClip {
    params: ClipParams,
    fps: Fps,
    frame_count: u64,
    background: BackgroundClip,
    lines: Vec<String>,
    caption: CaptionLayer,
    glitch: Option<GlitchEffect>,
}

impl TextClip {
    /// Wrap `text` to the canvas and prepare the background and caption layers.
    ///
    /// The caption is laid out at `params.fontsize`; run the autofit search first to pick it.
    #[tracing::instrument(skip(params, engine), fields(size = ?params.size, fontsize = params.fontsize))]
    pub fn new(
        text: &str,
        params: &ClipParams,
        engine: &mut TextLayoutEngine,
    ) -> TextclipResult<Self> {
        params.validate()?;
        let fps = params.frame_rate()?;

        let background = match &params.background {
            Background::Solid(color) => solid_clip(params.size, *color, params.duration)?,
            Background::Gradient(stops) => create_gradient_clip(params.size, stops, params.duration)?,
        };

        let font = engine.load_font(&params.font);
        let size_px = params.fontsize as f32;
        let wrap_width = params.size.width as f32 - 2.0 * params.padding as f32;
        let lines = {
            let mut metrics = engine.metrics(&font);
            wrap_text_to_width(text, &mut metrics, size_px, wrap_width)
        };
        tracing::debug!(?lines, "wrapped caption");

        let caption = CaptionLayer::new(
            engine,
            params.size,
            &lines,
            &font,
            size_px,
            params.text_color,
        )?;
        let glitch = params
            .glitch
            .then(|| GlitchEffect::new(params.glitch_intensity, params.seed));

        Ok(Self {
            params: params.clone(),
            fps,
            frame_count: fps.secs_to_frames_ceil(params.duration),
            background,
            lines,
            caption,
            glitch,
        })
    }

    /// Caption lines after wrapping.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of frames covering the clip duration.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Clip frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Parameters the clip was built from.
    pub fn params(&self) -> &ClipParams {
        &self.params
    }

    /// Render frame `idx`. Returns the frame and whether the glitch filter touched it.
    pub fn render_frame(&mut self, idx: FrameIndex) -> TextclipResult<(RgbImage, bool)> {
        let mut frame = self.background.image.clone();

        let scale = if self.params.expand {
            expand_scale(idx.0, self.params.duration * self.fps.as_f64())
        } else {
            1.0
        };
        if !self.caption.is_empty() {
            over_premul_in_place(&mut frame, self.caption.render(scale))?;
        }

        let t = self.fps.frame_to_secs(idx);
        fade_in_place(
            &mut frame,
            fade_factor(t, self.background.duration, self.params.fade_duration),
        );

        let glitched = match self.glitch.as_mut() {
            Some(glitch) => glitch.apply(&mut frame),
            None => false,
        };
        Ok((frame, glitched))
    }

    /// Render every frame into `sink`, with `audio` muxed in when given.
    #[tracing::instrument(skip(self, sink, audio), fields(frames = self.frame_count))]
    pub fn render_into<S: FrameSink + ?Sized>(
        &mut self,
        sink: &mut S,
        audio: Option<AudioInputConfig>,
    ) -> TextclipResult<RenderStats> {
        sink.begin(SinkConfig {
            width: self.params.size.width,
            height: self.params.size.height,
            fps: self.fps,
            audio,
        })?;

        let mut stats = RenderStats::default();
        for i in 0..self.frame_count {
            let idx = FrameIndex(i);
            let (frame, glitched) = self.render_frame(idx)?;
            sink.push_frame(idx, &frame)?;
            stats.frames_total += 1;
            stats.frames_glitched += u64::from(glitched);
        }

        sink.end()?;
        Ok(stats)
    }

    /// Encode the clip with its soundtrack to an MP4 at `out_path`.
    pub fn write_videofile(&mut self, out_path: &Path) -> TextclipResult<RenderStats> {
        if !is_ffmpeg_on_path() {
            return Err(TextclipError::encode(
                "ffmpeg is required for MP4 rendering, but was not found on PATH",
            ));
        }

        let assets_dir = self
            .params
            .assets_dir
            .clone()
            .unwrap_or_else(default_assets_dir);
        let manifest = load_soundtrack(
            &assets_dir,
            self.params.duration,
            self.params.audio_volume,
            self.params.effect,
        )?;

        let mut audio_tmp = TempFileGuard(None);
        let path = std::env::temp_dir().join(format!(
            "textclip_audio_mix_{}_{}.f32le",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));
        write_mix_to_f32le_file(&mix_manifest(&manifest), &path)?;
        audio_tmp.0 = Some(path.clone());

        let audio = AudioInputConfig {
            path,
            sample_rate: manifest.sample_rate,
            channels: manifest.channels,
        };
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path));
        let stats = self.render_into(&mut sink, Some(audio))?;
        drop(audio_tmp);
        Ok(stats)
    }
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
