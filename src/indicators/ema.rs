// =============================================================================
// Exponential Moving Average (EMA) — recursive first-order filter
// =============================================================================
//
// EMA gives more weight to recent observations, making it more responsive
// to new information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha = 2 / (span + 1)
//   EMA_0 = x_0
//   EMA_t = alpha * x_t + (1 - alpha) * EMA_{t-1}
//
// The filter is seeded with the first *defined* observation, so output is
// defined from index 0 onward on clean input — there is no warm-up gap.
// An undefined input (`None`) yields an undefined output at that index
// only; the filter state is carried past the gap unchanged, and the next
// defined observation resumes from the last valid EMA.
// =============================================================================

use anyhow::{ensure, Result};

/// Compute the recursive EMA of `values` with the given `span`.
///
/// The output has exactly the same length and index alignment as the input.
///
/// # Edge cases
/// - `span == 0` => error (division by zero guard, caller contract violation)
/// - leading `None`s => `None` until the first defined value seeds the filter
/// - `None` mid-series => `None` at that index, state unchanged
/// - a non-finite `Some` value is treated the same as `None`
pub fn recursive_ema(values: &[Option<f64>], span: usize) -> Result<Vec<Option<f64>>> {
    ensure!(span >= 1, "EMA span must be >= 1, got {span}");

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut state: Option<f64> = None;

    for &value in values {
        match value {
            Some(x) if x.is_finite() => {
                let ema = match state {
                    Some(prev) => alpha * x + (1.0 - alpha) * prev,
                    None => x, // seed with the first defined observation
                };
                state = Some(ema);
                result.push(Some(ema));
            }
            _ => result.push(None),
        }
    }

    Ok(result)
}
