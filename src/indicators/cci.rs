// =============================================================================
// Commodity Channel Index (CCI)
// =============================================================================
//
// CCI measures how far the typical price has drifted from its rolling mean,
// normalised by the window's mean absolute deviation:
//
//   TP  = (high + low + close) / 3
//   MA  = rolling mean of TP over `window` bars
//   MD  = rolling mean of |TP - window mean| over the same window
//   CCI = (TP - MA) / (0.015 * MD)
//
// Crossing thresholds: a buy edge fires when CCI comes back up through -100,
// a sell edge when it falls back down through +100.
//
// The rolling pass keeps a running sum for the mean and recomputes the
// deviation against the window's own mean each step — O(window) per bar.
// =============================================================================

use anyhow::{ensure, Result};

use crate::series::Series;

/// Index-aligned output of the CCI engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CciOutput {
    /// CCI value per bar; `None` inside the warm-up region, for windows
    /// overlapping a malformed bar, and for degenerate (zero-MAD) windows.
    pub cci: Vec<Option<f64>>,
    /// Buy edge per bar: CCI crossed up through -100 between i-1 and i.
    pub buy: Vec<bool>,
    /// Sell edge per bar: CCI crossed down through +100 between i-1 and i.
    pub sell: Vec<bool>,
}

/// Compute the CCI series and its edge flags for the given look-back window.
///
/// # Edge cases
/// - `window == 0` => error (caller contract violation, checked up front)
/// - index < window-1 => `None` (insufficient history)
/// - any non-finite high/low/close inside the window => `None` for every
///   window overlapping that bar
/// - window mean absolute deviation == 0 => `None` (never a division fault)
/// - an edge never fires at index 0 or where either CCI operand is `None`
pub fn compute_cci(series: &Series, window: usize) -> Result<CciOutput> {
    ensure!(window >= 1, "CCI window must be >= 1, got {window}");

    let n = series.len();

    // Typical prices; a malformed bar contributes None.
    let tp: Vec<Option<f64>> = series
        .bars()
        .iter()
        .map(|b| {
            if b.has_finite_prices() {
                Some((b.high + b.low + b.close) / 3.0)
            } else {
                None
            }
        })
        .collect();

    // ── Rolling mean + mean absolute deviation ───────────────────────────
    let mut cci: Vec<Option<f64>> = vec![None; n];
    let mut sum = 0.0;
    let mut undefined_in_window = 0usize;

    for i in 0..n {
        match tp[i] {
            Some(x) => sum += x,
            None => undefined_in_window += 1,
        }
        if i >= window {
            match tp[i - window] {
                Some(x) => sum -= x,
                None => undefined_in_window -= 1,
            }
        }

        // Warm-up region, or a malformed bar somewhere in the window.
        if i + 1 < window || undefined_in_window > 0 {
            continue;
        }

        let mean = sum / window as f64;
        let mad = tp[i + 1 - window..=i]
            .iter()
            .flatten()
            .map(|x| (x - mean).abs())
            .sum::<f64>()
            / window as f64;

        // Degenerate window: every TP equals the mean. Undefined, not ±inf.
        if mad == 0.0 {
            continue;
        }

        if let Some(typical) = tp[i] {
            cci[i] = Some((typical - mean) / (0.015 * mad));
        }
    }

    // ── Edge detection ───────────────────────────────────────────────────
    // Any comparison touching an undefined operand is "no edge"; index 0
    // has no predecessor and never fires.
    let mut buy = vec![false; n];
    let mut sell = vec![false; n];
    for i in 1..n {
        if let (Some(prev), Some(curr)) = (cci[i - 1], cci[i]) {
            buy[i] = curr > -100.0 && prev <= -100.0;
            sell[i] = curr < 100.0 && prev >= 100.0;
        }
    }

    Ok(CciOutput { cci, buy, sell })
}
