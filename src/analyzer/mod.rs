// Analyzer module: indicator computation and signal classification.

pub mod indicators;
pub mod signals;

use crate::config::AnalysisConfig;
use crate::model::{AnalyzeError, ChartSeries, DailyBar, IndicatorSnapshot, SectorReport, SectorSeries};
use crate::utils::{round1, round2};
use indicators::IndicatorEngine;

/// Runs one sector series through the indicator engine and builds its report
/// entry: rounded snapshot, trend signal, and the rebased chart series.
pub fn analyze_series(
    series: &SectorSeries,
    config: &AnalysisConfig,
) -> Result<SectorReport, AnalyzeError> {
    let insufficient = || AnalyzeError::InsufficientHistory {
        code: series.code.clone(),
        got: series.bars.len(),
        need: config.min_bars(),
    };
    if series.bars.len() < config.min_bars() {
        return Err(insufficient());
    }

    let mut engine = IndicatorEngine::new(config)?;
    for bar in &series.bars {
        engine.update(bar);
    }
    let latest = engine.latest().ok_or_else(insufficient)?;

    // Classify on the rounded values so the published table and the signal
    // can never disagree.
    let rsi = round1(latest.rsi);
    let pct_b = round2(latest.pct_b);
    let snapshot = IndicatorSnapshot {
        close: round1(latest.close),
        change_pct: round2(latest.change_pct),
        diff_short: round2(latest.diff_short),
        diff_mid: round2(latest.diff_mid),
        diff_long: round2(latest.diff_long),
        rsi,
        pct_b,
        volume_ratio: round2(latest.volume_ratio),
        signal: signals::classify(rsi, pct_b, config),
    };

    Ok(SectorReport {
        name: series.name.clone(),
        snapshot,
        series: rebase_series(&series.bars, config.chart_window),
    })
}

/// Close series over the chart window, rebased to 100 at the window start.
fn rebase_series(bars: &[DailyBar], window: usize) -> ChartSeries {
    let start = bars.len().saturating_sub(window);
    let window_bars = &bars[start..];

    let mut dates = Vec::with_capacity(window_bars.len());
    let mut values = Vec::with_capacity(window_bars.len());
    let base = match window_bars.first() {
        Some(bar) if bar.close != 0.0 => bar.close,
        _ => return ChartSeries { dates, values },
    };
    for bar in window_bars {
        dates.push(bar.date.format("%Y-%m-%d").to_string());
        values.push(round2(bar.close / base * 100.0));
    }
    ChartSeries { dates, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrendSignal;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> SectorSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        SectorSeries {
            code: "1617".to_string(),
            name: "食品".to_string(),
            bars: closes
                .iter()
                .enumerate()
                .map(|(i, &close)| DailyBar {
                    date: start + chrono::Days::new(i as u64),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 100_000 + (i as u64 % 7) * 10_000,
                })
                .collect(),
        }
    }

    /// Deterministic wobble around a slow uptrend.
    fn sample_closes(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 500.0 + (i as f64) * 0.4 + ((i % 5) as f64 - 2.0) * 3.0)
            .collect()
    }

    #[test]
    fn short_history_is_rejected() {
        let config = AnalysisConfig::default();
        let result = analyze_series(&series(&sample_closes(75)), &config);
        assert!(matches!(
            result,
            Err(AnalyzeError::InsufficientHistory { got: 75, need: 76, .. })
        ));
    }

    #[test]
    fn identical_input_yields_identical_snapshot() {
        let config = AnalysisConfig::default();
        let input = series(&sample_closes(300));
        let first = analyze_series(&input, &config).unwrap();
        let second = analyze_series(&input, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_values_are_in_range() {
        let config = AnalysisConfig::default();
        let report = analyze_series(&series(&sample_closes(300)), &config).unwrap();
        let s = &report.snapshot;
        assert!((0.0..=100.0).contains(&s.rsi));
        assert!(s.volume_ratio >= 0.0);
        assert!(s.close > 0.0);
    }

    #[test]
    fn strong_rally_is_flagged_overheated() {
        let config = AnalysisConfig::default();
        // flat base, then a hard two-week rally into the last bar
        let mut closes = vec![500.0; 90];
        for i in 0..10 {
            closes.push(500.0 + (i + 1) as f64 * 8.0);
        }
        let report = analyze_series(&series(&closes), &config).unwrap();
        assert_eq!(report.snapshot.signal, TrendSignal::Overheated);
        assert!(report.snapshot.change_pct > 0.0);
    }

    #[test]
    fn chart_series_is_rebased_to_100() {
        let config = AnalysisConfig::default();
        let report = analyze_series(&series(&sample_closes(300)), &config).unwrap();
        assert_eq!(report.series.values.len(), config.chart_window);
        assert_eq!(report.series.dates.len(), config.chart_window);
        assert_eq!(report.series.values[0], 100.0);
    }

    #[test]
    fn chart_window_shrinks_to_history() {
        let config = AnalysisConfig {
            chart_window: 500,
            ..AnalysisConfig::default()
        };
        let report = analyze_series(&series(&sample_closes(100)), &config).unwrap();
        assert_eq!(report.series.values.len(), 100);
        assert_eq!(report.series.values[0], 100.0);
    }
}
