// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the two indicator pipelines.
// Every output series is index-aligned 1:1 with the input `Series`; `None`
// marks an undefined value (insufficient history, degenerate window, or a
// malformed bar) so callers are forced to handle the gaps explicitly.

pub mod cci;
pub mod ema;
pub mod macd;

pub use cci::{compute_cci, CciOutput};
pub use macd::{compute_macd, MacdOutput};
