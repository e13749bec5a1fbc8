//! textclip renders short captioned title clips to MP4.
//!
//! A clip is a solid or gradient background with a centered caption, faded in and out, with
//! optional caption growth, a glitch filter, and a soundtrack built from bundled audio:
//!
//! - Fit the caption with [`autofit`] and wrap it with [`wrap_text_to_width`]
//! - Assemble a [`TextClip`] from [`ClipParams`]
//! - Render frames into any [`FrameSink`], or write an MP4 through `ffmpeg`
//!
//! The [`command`] module exposes all of this as a `textclip` clap subcommand.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Color parsers, font resolution, bundled audio.
pub mod assets;
/// Soundtrack planning and mixing.
pub mod audio;
/// Clip parameters, assembly and output naming.
pub mod clip;
pub mod command;
/// Frame filters.
pub mod effects;
/// Encoding sinks.
pub mod encode;
/// Errors and core value types.
pub mod foundation;
/// Backgrounds, caption rasterization and compositing.
pub mod render;
/// Text measurement, wrapping and font-size search.
pub mod text;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgb8};
pub use crate::foundation::error::{TextclipError, TextclipResult};

pub use crate::clip::output::generate_output_filename;
pub use crate::clip::params::{Background, ClipParams};
pub use crate::clip::session::{RenderStats, TextClip};
pub use crate::command::{TextclipArgs, TextclipCommand, TextclipOutcome, register_command};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::text::autofit::{FittedFont, FontSizeRange, autofit, fit_font_size};
pub use crate::text::layout::{FontMetrics, TextLayoutEngine};
pub use crate::text::wrap::wrap_text_to_width;
