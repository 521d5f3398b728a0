// =============================================================================
// Tidemark CLI — run the analysis over a JSON bar file
// =============================================================================
//
// Usage:
//   tidemark <bars.json> [config.json]
//
// The bar file is a JSON array of {timestamp, open, high, low, close,
// volume} objects with timestamps in epoch milliseconds. The optional
// config file tunes the indicator parameters; missing fields fall back to
// the defaults (window 14, spans 12/26/9).
// =============================================================================

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tidemark::{run_analysis, AnalysisConfig, Bar, Marker, Series, SignalKind};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let bars_path = match args.next() {
        Some(path) => path,
        None => bail!("usage: tidemark <bars.json> [config.json]"),
    };

    let config = match args.next() {
        Some(path) => AnalysisConfig::load(&path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AnalysisConfig::default()
        }),
        None => AnalysisConfig::default(),
    };

    let raw = std::fs::read_to_string(&bars_path)
        .with_context(|| format!("reading bar file {bars_path}"))?;
    let bars: Vec<Bar> =
        serde_json::from_str(&raw).with_context(|| format!("parsing bar file {bars_path}"))?;
    let series = Series::from_bars(bars)?;
    info!(bars = series.len(), "Loaded series");

    let report = run_analysis(&series, &config)?;

    for marker in report.buy_markers(&series) {
        print_marker(SignalKind::Buy, &marker);
    }
    for marker in report.sell_markers(&series) {
        print_marker(SignalKind::Sell, &marker);
    }

    Ok(())
}

fn print_marker(kind: SignalKind, marker: &Marker) {
    let when = DateTime::from_timestamp_millis(marker.timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| marker.timestamp.to_string());
    match marker.macd {
        Some(macd) => println!("{when}  {kind:<4}  close={:.5}  macd={macd:.5}", marker.close),
        None => println!("{when}  {kind:<4}  close={:.5}", marker.close),
    }
}
