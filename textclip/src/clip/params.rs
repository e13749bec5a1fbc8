use std::path::PathBuf;

use crate::effects::glitch::DEFAULT_GLITCH_INTENSITY;
use crate::foundation::core::{Canvas, Fps, Rgb8};
use crate::foundation::error::{TextclipError, TextclipResult};

/// Clip background.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// One flat color.
    Solid(Rgb8),
    /// Vertical gradient through evenly spaced stops.
    Gradient(Vec<Rgb8>),
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid(Rgb8::BLACK)
    }
}

/// Everything needed to render a captioned clip, except the caption itself.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClipParams {
    /// Output size.
    pub size: Canvas,
    /// Clip length in seconds.
    pub duration: f64,
    /// Fade in/out length in seconds; `0` disables fading.
    pub fade_duration: f64,
    /// Font family name or font file path.
    pub font: String,
    /// Caption font size in pixels.
    pub fontsize: u32,
    /// Caption color.
    pub text_color: Rgb8,
    /// Background fill.
    pub background: Background,
    /// Frames per second.
    pub fps: u32,
    /// Horizontal padding around the caption, in pixels.
    pub padding: u32,
    /// Slowly enlarge the caption.
    pub expand: bool,
    /// Mix the sound effect in at the start.
    pub effect: bool,
    /// Apply the glitch filter.
    pub glitch: bool,
    /// Gain of the background audio loop.
    pub audio_volume: f32,
    /// Maximum glitch slice displacement in pixels.
    pub glitch_intensity: u32,
    /// Seed for the glitch filter; random when absent.
    pub seed: Option<u64>,
    /// Directory holding the bundled audio; the default location when absent.
    pub assets_dir: Option<PathBuf>,
}

impl Default for ClipParams {
    fn default() -> Self {
        Self {
            size: Canvas::default(),
            duration: 5.0,
            fade_duration: 1.0,
            font: "Arial".to_owned(),
            fontsize: 50,
            text_color: Rgb8::WHITE,
            background: Background::default(),
            fps: 60,
            padding: 30,
            expand: false,
            effect: false,
            glitch: false,
            audio_volume: 0.01,
            glitch_intensity: DEFAULT_GLITCH_INTENSITY,
            seed: None,
            assets_dir: None,
        }
    }
}

impl ClipParams {
    /// Check ranges that would otherwise surface as encoder failures.
    pub fn validate(&self) -> TextclipResult<()> {
        Canvas::new(self.size.width, self.size.height)?;
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(TextclipError::validation("duration must be > 0 seconds"));
        }
        if !self.fade_duration.is_finite() || self.fade_duration < 0.0 {
            return Err(TextclipError::validation("fade duration must be >= 0 seconds"));
        }
        if self.fontsize == 0 {
            return Err(TextclipError::validation("font size must be > 0"));
        }
        if !self.audio_volume.is_finite() || self.audio_volume < 0.0 {
            return Err(TextclipError::validation("audio volume must be >= 0"));
        }
        if let Background::Gradient(stops) = &self.background
            && stops.is_empty()
        {
            return Err(TextclipError::validation(
                "gradient needs at least one color stop",
            ));
        }
        self.frame_rate()?;
        Ok(())
    }

    /// Frame rate as a validated [`Fps`].
    pub fn frame_rate(&self) -> TextclipResult<Fps> {
        Fps::whole(self.fps)
    }
}
