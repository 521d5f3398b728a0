// =============================================================================
// Signal Aggregator — combined CCI/MACD event feed
// =============================================================================
//
// Walks the input series once, in timestamp order, and merges the per-index
// edge flags of both engines:
// - per-source events keep their provenance (which engine fired)
// - the combined feed is a logical OR per kind; when both engines fire the
//   same kind at the same bar, the timestamp appears once, not twice

use serde::Serialize;

use crate::indicators::{CciOutput, MacdOutput};
use crate::series::Series;

/// Direction of a signal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalKind {
    Buy,
    Sell,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Which engine raised a signal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalSource {
    Cci,
    Macd,
    Combined,
}

impl std::fmt::Display for SignalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cci => write!(f, "CCI"),
            Self::Macd => write!(f, "MACD"),
            Self::Combined => write!(f, "CCI+MACD"),
        }
    }
}

/// One discrete buy/sell event. Derived, never stored independently of the
/// series that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalEvent {
    pub timestamp: i64,
    pub kind: SignalKind,
    pub source: SignalSource,
}

/// The merged output of both engines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedSignals {
    /// Timestamps where either engine raised a buy edge, series order.
    pub buy: Vec<i64>,
    /// Timestamps where either engine raised a sell edge, series order.
    pub sell: Vec<i64>,
    /// Per-source events with provenance, series order.
    pub events: Vec<SignalEvent>,
}

impl CombinedSignals {
    /// The combined feed as flat events (one per timestamp per kind).
    pub fn combined_events(&self) -> Vec<SignalEvent> {
        let mut events: Vec<SignalEvent> = self
            .buy
            .iter()
            .map(|&timestamp| SignalEvent {
                timestamp,
                kind: SignalKind::Buy,
                source: SignalSource::Combined,
            })
            .chain(self.sell.iter().map(|&timestamp| SignalEvent {
                timestamp,
                kind: SignalKind::Sell,
                source: SignalSource::Combined,
            }))
            .collect();
        events.sort_by_key(|e| e.timestamp);
        events
    }
}

/// Merge the edge flags of both engines into one combined feed.
///
/// Both outputs must have been computed from the same `series`; they are
/// index-aligned by construction, so a single zip over the bars suffices.
pub fn combine(series: &Series, cci: &CciOutput, macd: &MacdOutput) -> CombinedSignals {
    let mut buy = Vec::new();
    let mut sell = Vec::new();
    let mut events = Vec::new();

    let flags = series
        .bars()
        .iter()
        .zip(cci.buy.iter().zip(cci.sell.iter()))
        .zip(macd.buy.iter().zip(macd.sell.iter()));

    for ((bar, (&cci_buy, &cci_sell)), (&macd_buy, &macd_sell)) in flags {
        if cci_buy {
            events.push(SignalEvent {
                timestamp: bar.timestamp,
                kind: SignalKind::Buy,
                source: SignalSource::Cci,
            });
        }
        if macd_buy {
            events.push(SignalEvent {
                timestamp: bar.timestamp,
                kind: SignalKind::Buy,
                source: SignalSource::Macd,
            });
        }
        if cci_sell {
            events.push(SignalEvent {
                timestamp: bar.timestamp,
                kind: SignalKind::Sell,
                source: SignalSource::Cci,
            });
        }
        if macd_sell {
            events.push(SignalEvent {
                timestamp: bar.timestamp,
                kind: SignalKind::Sell,
                source: SignalSource::Macd,
            });
        }
        // Collapse a double fire into one combined timestamp.
        if cci_buy || macd_buy {
            buy.push(bar.timestamp);
        }
        if cci_sell || macd_sell {
            sell.push(bar.timestamp);
        }
    }

    CombinedSignals { buy, sell, events }
}
