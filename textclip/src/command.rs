//! The `textclip` subcommand: argument surface and handler.

use std::path::PathBuf;

use clap::{Args, FromArgMatches as _};

use crate::assets::color::{parse_color, parse_gradient_colors, parse_text_color};
use crate::clip::output::generate_output_filename;
use crate::clip::params::{Background, ClipParams};
use crate::clip::session::TextClip;
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::TextclipResult;
use crate::text::autofit::{FontSizeRange, autofit};
use crate::text::layout::TextLayoutEngine;

/// Smallest font size the autofit search falls back to.
pub const MIN_FONT_SIZE: u32 = 10;

fn default_font() -> String {
    if cfg!(target_os = "macos") {
        "Papyrus".to_owned()
    } else {
        "Arial".to_owned()
    }
}

fn parse_size(s: &str) -> TextclipResult<Canvas> {
    s.parse()
}

/// Arguments of `textclip`.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct TextclipArgs {
    /// Text to display.
    pub text: String,

    /// Font name or font file path. Ex Noteworthy, Menlo, Papyrus, Zapfino.
    #[arg(short, long, default_value_t = default_font())]
    pub font: String,

    /// Largest font size to try; the caption shrinks until it fits.
    #[arg(long, visible_alias = "fs", default_value_t = 210)]
    pub fontsize: u32,

    /// Duration of the video in seconds.
    #[arg(short, long, default_value_t = 3.0)]
    pub duration: f64,

    /// Fade-in/out duration in seconds.
    #[arg(long, visible_alias = "fd", default_value_t = 0.5)]
    pub fade_duration: f64,

    /// Text color: a name, #RRGGBB or R,G,B.
    #[arg(long, visible_alias = "tc", default_value = "white", value_parser = parse_text_color)]
    pub text_color: Rgb8,

    /// Background color as R,G,B.
    #[arg(long, visible_alias = "bg", default_value = "0,0,0", value_parser = parse_color)]
    pub bg_color: Rgb8,

    /// Gradient background as semicolon-separated "R G B" triples, e.g. "255 0 0;0 0 255".
    #[arg(long, visible_alias = "gc", value_parser = parse_gradient_colors)]
    pub gradient_colors: Option<::std::vec::Vec<Rgb8>>,

    /// Video size as W,H.
    #[arg(short, long, default_value = "1920,1080", value_parser = parse_size)]
    pub size: Canvas,

    /// Output video file; derived from the text when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Padding around the text in pixels.
    #[arg(short, long, default_value_t = 30)]
    pub padding: u32,

    /// Slowly enlarge the text during the video.
    #[arg(short, long)]
    pub expand: bool,

    /// Add the sound effect at the start.
    #[arg(long, visible_alias = "ef")]
    pub effect: bool,

    /// Add a glitch effect.
    #[arg(short, long)]
    pub glitch: bool,

    /// Gain of the background audio.
    #[arg(long, default_value_t = 0.01)]
    pub audio_volume: f32,

    /// Maximum glitch displacement in pixels.
    #[arg(long, default_value_t = 20)]
    pub glitch_intensity: u32,

    /// Seed for the glitch effect.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory with the bundled audio assets.
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Print the resolved clip parameters as JSON and exit.
    #[arg(long)]
    pub dump_params: bool,
}

impl TextclipArgs {
    /// Clip parameters for these arguments, with the caption at `fontsize`.
    pub fn clip_params(&self, fontsize: u32) -> ClipParams {
        let background = match &self.gradient_colors {
            Some(stops) => Background::Gradient(stops.clone()),
            None => Background::Solid(self.bg_color),
        };
        ClipParams {
            size: self.size,
            duration: self.duration,
            fade_duration: self.fade_duration,
            font: self.font.clone(),
            fontsize,
            text_color: self.text_color,
            background,
            fps: self.fps,
            padding: self.padding,
            expand: self.expand,
            effect: self.effect,
            glitch: self.glitch,
            audio_volume: self.audio_volume,
            glitch_intensity: self.glitch_intensity,
            seed: self.seed,
            assets_dir: self.assets_dir.clone(),
        }
    }
}

/// Outcome of a `textclip` invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum TextclipOutcome {
    /// An MP4 was written here.
    Written(PathBuf),
    /// Parameters were printed instead of rendering.
    Dumped(String),
}

/// Stateless handler for the `textclip` subcommand.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextclipCommand;

impl TextclipCommand {
    /// Subcommand name.
    pub const NAME: &'static str = "textclip";

    /// Pick the font size and build the clip parameters.
    pub fn prepare(
        &self,
        args: &TextclipArgs,
        engine: &mut TextLayoutEngine,
    ) -> ClipParams {
        let fitted = autofit(
            engine,
            &args.text,
            &args.font,
            args.size.width as f32,
            args.padding as f32,
            FontSizeRange::new(MIN_FONT_SIZE, args.fontsize),
        );
        args.clip_params(fitted.size)
    }

    /// Render the clip described by `args`.
    pub fn run(&self, args: &TextclipArgs) -> TextclipResult<TextclipOutcome> {
        let mut engine = TextLayoutEngine::new();
        let params = self.prepare(args, &mut engine);
        if args.dump_params {
            let json = serde_json::to_string_pretty(&params)
                .map_err(|e| anyhow::anyhow!("failed to serialize clip params: {e}"))?;
            return Ok(TextclipOutcome::Dumped(json));
        }

        let output = generate_output_filename(&args.text, args.output.as_deref());
        let mut clip = TextClip::new(&args.text, &params, &mut engine)?;
        let stats = clip.write_videofile(&output)?;
        tracing::info!(
            out = %output.display(),
            frames = stats.frames_total,
            glitched = stats.frames_glitched,
            "clip written"
        );
        Ok(TextclipOutcome::Written(output))
    }

    /// Parse `textclip` arguments out of the subcommand's matches.
    pub fn parse_args(&self, matches: &clap::ArgMatches) -> Result<TextclipArgs, clap::Error> {
        TextclipArgs::from_arg_matches(matches)
    }
}

/// Attach the `textclip` subcommand to `app`.
pub fn register_command(app: clap::Command) -> (clap::Command, TextclipCommand) {
    let sub = TextclipArgs::augment_args(
        clap::Command::new(TextclipCommand::NAME).about("Create a color clip with overlaid text"),
    );
    (app.subcommand(sub), TextclipCommand)
}
