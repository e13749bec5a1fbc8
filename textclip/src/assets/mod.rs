/// Color, gradient and caption-color string parsers.
pub mod color;
/// Font identifier resolution.
pub mod font;
/// Bundled audio assets and `ffmpeg` audio decoding.
pub mod media;
