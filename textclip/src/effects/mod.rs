/// Slice displacement / channel split glitch filter.
pub mod glitch;
