// =============================================================================
// Signals Module
// =============================================================================
//
// Turns the per-index edge flags produced by the indicator engines into
// discrete, timestamped buy/sell events and merges the two sources into one
// combined feed (logical OR per timestamp, duplicates collapsed).

pub mod aggregator;

pub use aggregator::{combine, CombinedSignals, SignalEvent, SignalKind, SignalSource};
