/// Soundtrack planning: which sources play when, and how loud.
pub mod manifest;
/// PCM mixing and raw `f32le` output.
pub mod mix;
