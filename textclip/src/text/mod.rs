/// Font-size search over a pixel budget.
pub mod autofit;
/// Parley text layout engine and font metrics.
pub mod layout;
/// Greedy word wrap by measured width.
pub mod wrap;
