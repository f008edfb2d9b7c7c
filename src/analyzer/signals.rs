// Threshold classification and the report ranking.
use crate::config::AnalysisConfig;
use crate::model::{ReportPayload, SectorReport, TrendSignal};
use std::cmp::Ordering;

/// Overheated needs both the momentum and the band break; undervalued is the
/// mirror image. Everything in between is neutral.
pub fn classify(rsi: f64, pct_b: f64, config: &AnalysisConfig) -> TrendSignal {
    if rsi >= config.overheated_rsi && pct_b >= config.overheated_pct_b {
        TrendSignal::Overheated
    } else if rsi <= config.undervalued_rsi && pct_b <= config.undervalued_pct_b {
        TrendSignal::Undervalued
    } else {
        TrendSignal::Neutral
    }
}

/// Sectors flagged overheated that are still rising, hottest RSI first,
/// truncated (never padded) to `limit`.
pub fn rank_overheated(payload: &ReportPayload, limit: usize) -> Vec<(&str, &SectorReport)> {
    let mut ranked: Vec<(&str, &SectorReport)> = payload
        .sectors
        .iter()
        .filter(|(_, report)| {
            report.snapshot.signal == TrendSignal::Overheated && report.snapshot.change_pct > 0.0
        })
        .map(|(code, report)| (code.as_str(), report))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.snapshot
            .rsi
            .partial_cmp(&a.1.snapshot.rsi)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}
