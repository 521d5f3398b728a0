// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD tracks the spread between a fast and a slow EMA of the close price;
// a second EMA smoothed over that spread gives the signal line:
//
//   MACD   = EMA(close, fast) - EMA(close, slow)
//   Signal = EMA(MACD, signal_span)
//
// A buy edge fires when the MACD line crosses up through the signal line,
// a sell edge when it crosses down. Because the EMAs are recursive filters
// seeded at the first observation, both lines are defined from index 0 —
// unlike CCI there is no warm-up gap.
// =============================================================================

use anyhow::{ensure, Result};

use crate::indicators::ema::recursive_ema;
use crate::series::Series;

/// Index-aligned output of the MACD engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA per bar; `None` only where close is malformed.
    pub macd: Vec<Option<f64>>,
    /// EMA of the MACD line; same definedness as `macd`.
    pub signal: Vec<Option<f64>>,
    /// Buy edge per bar: MACD crossed up through the signal line.
    pub buy: Vec<bool>,
    /// Sell edge per bar: MACD crossed down through the signal line.
    pub sell: Vec<bool>,
}

/// Compute the MACD line, signal line, and their crossing edges.
///
/// Only the close price feeds this indicator, so a bar with a malformed
/// high or low but a finite close still computes normally.
///
/// # Edge cases
/// - any span `== 0` => error (caller contract violation, checked up front)
/// - non-finite close => `None` at that index only; the EMA filters resume
///   from their pre-gap state at the next finite close
/// - an edge never fires at index 0 or where any of the four crossing
///   operands is `None`
pub fn compute_macd(
    series: &Series,
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> Result<MacdOutput> {
    ensure!(fast >= 1, "fast span must be >= 1, got {fast}");
    ensure!(slow >= 1, "slow span must be >= 1, got {slow}");
    ensure!(signal_span >= 1, "signal span must be >= 1, got {signal_span}");

    let closes: Vec<Option<f64>> = series
        .bars()
        .iter()
        .map(|b| if b.close.is_finite() { Some(b.close) } else { None })
        .collect();

    let ema_fast = recursive_ema(&closes, fast)?;
    let ema_slow = recursive_ema(&closes, slow)?;

    let macd: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal = recursive_ema(&macd, signal_span)?;

    // Any comparison touching an undefined operand is "no edge"; index 0
    // has no predecessor and never fires.
    let n = series.len();
    let mut buy = vec![false; n];
    let mut sell = vec![false; n];
    for i in 1..n {
        if let (Some(m_prev), Some(s_prev), Some(m), Some(s)) =
            (macd[i - 1], signal[i - 1], macd[i], signal[i])
        {
            buy[i] = m > s && m_prev <= s_prev;
            sell[i] = m < s && m_prev >= s_prev;
        }
    }

    Ok(MacdOutput {
        macd,
        signal,
        buy,
        sell,
    })
}
