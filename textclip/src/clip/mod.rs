/// Output file naming.
pub mod output;
/// Clip parameters and defaults.
pub mod params;
/// Clip assembly, frame rendering and MP4 output.
pub mod session;
