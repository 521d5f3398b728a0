// =============================================================================
// Price Series — Immutable, time-ordered OHLCV bars
// =============================================================================
//
// The input side of the engine. A `Series` is built once from a vector of
// bars, validated on construction, and read-only from then on. Every derived
// artifact (indicator series, signal events) is index-aligned to the Series
// and recomputed from scratch; nothing ever mutates a bar in place.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A single OHLCV bar. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    /// Whether all three price fields the indicators consume are finite.
    ///
    /// A bar that fails this check is not rejected — its derived values
    /// become undefined (`None`) while neighbouring bars compute normally.
    pub fn has_finite_prices(&self) -> bool {
        self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

/// An ordered, duplicate-free bar sequence.
///
/// Invariants enforced at construction:
/// - timestamps strictly increasing (no duplicates, no reordering)
/// - volume non-negative on every bar
///
/// Non-finite price fields are deliberately *not* a constructor error: they
/// are a per-index data condition handled downstream, not a contract
/// violation by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Build a series, failing fast on ordering or volume violations.
    pub fn from_bars(bars: Vec<Bar>) -> Result<Self> {
        for window in bars.windows(2) {
            if window[1].timestamp <= window[0].timestamp {
                bail!(
                    "bar timestamps must be strictly increasing: {} followed by {}",
                    window[0].timestamp,
                    window[1].timestamp
                );
            }
        }
        if let Some(bad) = bars.iter().find(|b| b.volume < 0.0) {
            bail!("negative volume {} at timestamp {}", bad.volume, bad.timestamp);
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn bar(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Close prices, index-aligned with the bars.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Timestamps, index-aligned with the bars.
    pub fn timestamps(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Position of the bar with the given timestamp, if present.
    pub fn position_of(&self, timestamp: i64) -> Option<usize> {
        self.bars
            .binary_search_by_key(&timestamp, |b| b.timestamp)
            .ok()
    }
}
