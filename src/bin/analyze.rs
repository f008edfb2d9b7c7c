// Analysis step: fetch daily bars per sector, compute indicators, write the
// report payload. Per-sector failures are logged and skipped; a run with no
// usable sector at all exits non-zero.
use sector_pulse::analyzer::analyze_series;
use sector_pulse::config::{AnalysisConfig, load_config, report_path};
use sector_pulse::fetcher::{BarSource, YahooFetcher};
use sector_pulse::model::{ReportPayload, SectorReport, SectorSeries};
use sector_pulse::payload::save_payload;
use sector_pulse::sectors::SECTOR_ETFS;
use sector_pulse::utils::jst_now;
use std::collections::BTreeMap;
use std::path::Path;
use std::process;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            process::exit(1);
        }
    };

    let fetcher = YahooFetcher::new();
    info!("🚀 Analyzing {} sector ETFs...", SECTOR_ETFS.len());
    let sectors = collect_reports(&fetcher, &config).await;

    if sectors.is_empty() {
        error!("❌ No sector could be analyzed, aborting");
        process::exit(1);
    }

    let payload = ReportPayload {
        generated_at: jst_now().format("%Y-%m-%d %H:%M").to_string(),
        sectors,
    };
    let path = report_path();
    if let Err(e) = save_payload(Path::new(&path), &payload) {
        error!("Failed to write {}: {}", path, e);
        process::exit(1);
    }
    info!("✅ Wrote {} sectors to {}", payload.sectors.len(), path);
}

/// Walks the sector table sequentially. A failing sector is logged and
/// skipped; the rest of the run continues.
async fn collect_reports(
    fetcher: &dyn BarSource,
    config: &AnalysisConfig,
) -> BTreeMap<String, SectorReport> {
    let mut sectors = BTreeMap::new();
    for (i, (code, name)) in SECTOR_ETFS.iter().enumerate() {
        if i > 0 {
            sleep(Duration::from_millis(config.fetch_delay_ms)).await;
        }
        match process_sector(fetcher, code, name, config).await {
            Ok(report) => {
                info!(
                    "{} {}: close {:.1} | RSI {:.1} | %B {:.2} | {:?}",
                    code,
                    name,
                    report.snapshot.close,
                    report.snapshot.rsi,
                    report.snapshot.pct_b,
                    report.snapshot.signal
                );
                sectors.insert(code.to_string(), report);
            }
            Err(e) => warn!("Skipping {} {}: {}", code, name, e),
        }
    }
    sectors
}

/// Fetches and analyzes a single sector.
async fn process_sector(
    fetcher: &dyn BarSource,
    code: &str,
    name: &str,
    config: &AnalysisConfig,
) -> Result<SectorReport, Box<dyn std::error::Error>> {
    let bars = fetcher.fetch_daily(code).await?;
    let series = SectorSeries {
        code: code.to_string(),
        name: name.to_string(),
        bars,
    };
    Ok(analyze_series(&series, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sector_pulse::model::{DailyBar, FetchError};

    /// One healthy sector, one short history, errors for the rest.
    struct FakeSource;

    #[async_trait::async_trait]
    impl BarSource for FakeSource {
        async fn fetch_daily(&self, code: &str) -> Result<Vec<DailyBar>, FetchError> {
            let len = match code {
                "1617" => 300,
                "1618" => 10,
                _ => return Err(FetchError::NoData(code.to_string())),
            };
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            Ok((0..len)
                .map(|i| {
                    let close = 500.0 + (i as f64) * 0.3 + ((i % 4) as f64 - 1.5) * 2.0;
                    DailyBar {
                        date: start + chrono::Days::new(i as u64),
                        open: close,
                        high: close + 1.0,
                        low: close - 1.0,
                        close,
                        volume: 100_000,
                    }
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn failing_sectors_do_not_abort_the_run() {
        let config = AnalysisConfig {
            fetch_delay_ms: 0,
            ..AnalysisConfig::default()
        };
        let sectors = collect_reports(&FakeSource, &config).await;
        assert_eq!(sectors.len(), 1);
        assert!(sectors.contains_key("1617"));
        assert_eq!(sectors["1617"].name, "食品");
    }
}

