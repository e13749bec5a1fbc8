/// Frame compositing: caption over background, fades.
pub mod compose;
/// Gradient and solid background synthesis.
pub mod gradient;
/// Caption rasterization with `vello_cpu`.
pub mod text;
