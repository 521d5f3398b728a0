// =============================================================================
// Tidemark — CCI/MACD indicator and crossing-signal engine
// =============================================================================
//
// A pure, synchronous engine: an ordered series of OHLC bars plus a handful
// of parameters in, index-aligned indicator curves and discrete buy/sell
// events out. No fetching, no caching, no rendering — those live with the
// caller.

pub mod analysis;
pub mod config;
pub mod indicators;
pub mod series;
pub mod signals;

pub use analysis::{run_analysis, AnalysisReport, Marker};
pub use config::AnalysisConfig;
pub use indicators::{compute_cci, compute_macd, CciOutput, MacdOutput};
pub use series::{Bar, Series};
pub use signals::{combine, CombinedSignals, SignalEvent, SignalKind, SignalSource};
