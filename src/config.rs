// =============================================================================
// Analysis Configuration — Indicator parameters with serde defaults
// =============================================================================
//
// Every tunable parameter of the engine lives here. All fields carry
// `#[serde(default)]` so that loading an older or partial config file never
// breaks. Validation happens once, before any computation starts: a
// non-positive window or span is a caller contract violation, not a data
// condition, so it fails fast instead of producing undefined values.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_window() -> usize {
    14
}

fn default_fast_span() -> usize {
    12
}

fn default_slow_span() -> usize {
    26
}

fn default_signal_span() -> usize {
    9
}

// =============================================================================
// AnalysisConfig
// =============================================================================

/// Tunable parameters for the CCI and MACD engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// CCI look-back window length. Widens or narrows the undefined warm-up
    /// region and the smoothing of the oscillator.
    #[serde(default = "default_window")]
    pub window: usize,

    /// Fast EMA span for the MACD line.
    #[serde(default = "default_fast_span")]
    pub fast_span: usize,

    /// Slow EMA span for the MACD line.
    #[serde(default = "default_slow_span")]
    pub slow_span: usize,

    /// EMA span for the signal line smoothed over the MACD series.
    #[serde(default = "default_signal_span")]
    pub signal_span: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            fast_span: default_fast_span(),
            slow_span: default_slow_span(),
            signal_span: default_signal_span(),
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        info!(?config, "Loaded analysis config");
        Ok(config)
    }

    /// Reject non-positive parameters before any computation begins.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.window >= 1, "CCI window must be >= 1, got {}", self.window);
        ensure!(self.fast_span >= 1, "fast span must be >= 1, got {}", self.fast_span);
        ensure!(self.slow_span >= 1, "slow span must be >= 1, got {}", self.slow_span);
        ensure!(
            self.signal_span >= 1,
            "signal span must be >= 1, got {}",
            self.signal_span
        );
        Ok(())
    }
}
