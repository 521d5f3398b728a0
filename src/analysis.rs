// =============================================================================
// Analysis Pipeline — series in, indicator curves and signal events out
// =============================================================================
//
// The one entry point callers need:
//   1. Validate the parameters (fail fast, before any math)
//   2. Run the CCI engine
//   3. Run the MACD engine
//   4. Merge both edge feeds into the combined signal set
//
// Both engines are pure functions of the same read-only series and never
// touch each other's output, so a caller is free to evaluate them in
// parallel; this sequential pipeline is simply the common case.
// =============================================================================

use anyhow::Result;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::indicators::{compute_cci, compute_macd, CciOutput, MacdOutput};
use crate::series::Series;
use crate::signals::{combine, CombinedSignals};

/// A point to draw against the price curve or the MACD curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub timestamp: i64,
    pub close: f64,
    pub macd: Option<f64>,
}

/// Everything one analysis run produces, index-aligned to the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub cci: CciOutput,
    pub macd: MacdOutput,
    pub combined: CombinedSignals,
}

impl AnalysisReport {
    /// Combined buy events with the values a renderer needs to place them.
    pub fn buy_markers(&self, series: &Series) -> Vec<Marker> {
        self.markers(series, &self.combined.buy)
    }

    /// Combined sell events with the values a renderer needs to place them.
    pub fn sell_markers(&self, series: &Series) -> Vec<Marker> {
        self.markers(series, &self.combined.sell)
    }

    fn markers(&self, series: &Series, timestamps: &[i64]) -> Vec<Marker> {
        timestamps
            .iter()
            .filter_map(|&timestamp| {
                let index = series.position_of(timestamp)?;
                let bar = series.bar(index)?;
                Some(Marker {
                    timestamp,
                    close: bar.close,
                    macd: self.macd.macd.get(index).copied().flatten(),
                })
            })
            .collect()
    }
}

/// Run the full pipeline over a series with the given parameters.
///
/// Stateless and deterministic: identical inputs always produce identical
/// reports, and nothing is retained between calls.
pub fn run_analysis(series: &Series, config: &AnalysisConfig) -> Result<AnalysisReport> {
    // ── 1. Parameter validation ──────────────────────────────────────────
    config.validate()?;

    // ── 2. CCI engine ────────────────────────────────────────────────────
    let cci = compute_cci(series, config.window)?;
    debug!(
        window = config.window,
        defined = cci.cci.iter().filter(|v| v.is_some()).count(),
        "CCI computed"
    );

    // ── 3. MACD engine ───────────────────────────────────────────────────
    let macd = compute_macd(series, config.fast_span, config.slow_span, config.signal_span)?;
    debug!(
        fast = config.fast_span,
        slow = config.slow_span,
        signal = config.signal_span,
        "MACD computed"
    );

    // ── 4. Combined signal feed ──────────────────────────────────────────
    let combined = combine(series, &cci, &macd);
    info!(
        bars = series.len(),
        buys = combined.buy.len(),
        sells = combined.sell.len(),
        "Analysis complete"
    );

    Ok(AnalysisReport {
        cci,
        macd,
        combined,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Bar;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar {
            timestamp: ts,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1.0,
        }
    }

    fn series_from_closes(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar((i as i64 + 1) * 60_000, c))
            .collect();
        Series::from_bars(bars).unwrap()
    }

    fn oscillating(n: usize) -> Series {
        let closes: Vec<f64> = (0..n)
            .map(|i| 100.0 + 25.0 * ((i as f64) * 0.2).sin())
            .collect();
        series_from_closes(&closes)
    }

    #[test]
    fn run_analysis_rejects_invalid_parameters_before_computing() {
        let series = oscillating(50);
        let config = AnalysisConfig {
            window: 0,
            ..AnalysisConfig::default()
        };
        assert!(run_analysis(&series, &config).is_err());
    }

    #[test]
    fn report_series_are_aligned_to_input() {
        let series = oscillating(80);
        let report = run_analysis(&series, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.cci.cci.len(), 80);
        assert_eq!(report.macd.macd.len(), 80);
        assert_eq!(report.macd.signal.len(), 80);
        assert_eq!(report.cci.buy.len(), 80);
        assert_eq!(report.macd.sell.len(), 80);
    }

    #[test]
    fn run_analysis_is_idempotent() {
        let series = oscillating(100);
        let config = AnalysisConfig::default();
        let a = run_analysis(&series, &config).unwrap();
        let b = run_analysis(&series, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn combined_feed_matches_engine_flags() {
        let series = oscillating(150);
        let report = run_analysis(&series, &AnalysisConfig::default()).unwrap();

        for (i, b) in series.bars().iter().enumerate() {
            let expected_buy = report.cci.buy[i] || report.macd.buy[i];
            let expected_sell = report.cci.sell[i] || report.macd.sell[i];
            assert_eq!(report.combined.buy.contains(&b.timestamp), expected_buy);
            assert_eq!(report.combined.sell.contains(&b.timestamp), expected_sell);
        }
    }

    #[test]
    fn markers_carry_close_and_macd_values() {
        let series = oscillating(150);
        let report = run_analysis(&series, &AnalysisConfig::default()).unwrap();
        let buys = report.buy_markers(&series);
        assert_eq!(buys.len(), report.combined.buy.len());
        for marker in &buys {
            let index = series.position_of(marker.timestamp).unwrap();
            assert_eq!(marker.close, series.bar(index).unwrap().close);
            assert!(marker.macd.is_some());
        }
    }

    #[test]
    fn nan_bar_mid_series_stays_local() {
        let mut closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + 10.0 * ((i as f64) * 0.3).sin())
            .collect();
        closes[30] = f64::NAN;
        let mut bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar((i as i64 + 1) * 1000, c))
            .collect();
        bars[30].high = f64::NAN;
        bars[30].low = f64::NAN;
        let series = Series::from_bars(bars).unwrap();

        let config = AnalysisConfig::default();
        let report = run_analysis(&series, &config).unwrap();

        // The malformed bar itself is undefined everywhere.
        assert!(report.cci.cci[30].is_none());
        assert!(report.macd.macd[30].is_none());

        // MACD recovers immediately on both sides.
        assert!(report.macd.macd[29].is_some());
        assert!(report.macd.macd[31].is_some());

        // CCI recovers once the window has slid past the bad bar.
        assert!(report.cci.cci[30 + config.window].is_some());
    }

    #[test]
    fn short_series_produces_no_cci_but_full_macd() {
        let series = series_from_closes(&[100.0, 101.0, 99.0, 102.0, 98.0]);
        let report = run_analysis(&series, &AnalysisConfig::default()).unwrap();
        assert!(report.cci.cci.iter().all(|v| v.is_none()));
        assert!(report.macd.macd.iter().all(|v| v.is_some()));
    }
}
