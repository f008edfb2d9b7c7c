// Yahoo Finance v8 chart API client. Sector ETFs trade on the TSE, so codes
// are quoted as {code}.T.
use crate::fetcher::BarSource;
use crate::model::{DailyBar, FetchError};
use crate::utils::jst_date_from_epoch;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
/// Two years of history leaves enough warm-up buffer for the 75-day SMA.
const RANGE: &str = "2y";

pub struct YahooFetcher {
    client: Client,
    base_url: String,
}

impl YahooFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) SectorPulse/0.1")
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to create HTTP client");
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn build_url(&self, code: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}.T?range={}&interval=1d",
            self.base_url, code, RANGE
        )
    }
}

#[async_trait::async_trait]
impl BarSource for YahooFetcher {
    async fn fetch_daily(&self, code: &str) -> Result<Vec<DailyBar>, FetchError> {
        let url = self.build_url(code);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Api(format!("status {} for {}", status, code)));
        }

        let decoded: ChartResponse = response.json().await?;
        if let Some(err) = decoded.chart.error {
            return Err(FetchError::Api(err.to_string()));
        }
        let result = decoded
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| FetchError::InvalidResponse(format!("empty result for {}", code)))?;

        let bars = into_bars(&result);
        if bars.is_empty() {
            return Err(FetchError::NoData(code.to_string()));
        }
        Ok(bars)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartNode,
}

#[derive(Debug, Deserialize)]
struct ChartNode {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.code, description),
            None => write!(f, "{}", self.code),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteBlock>,
}

/// Parallel arrays; entries are null on halted days.
#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Zips the parallel arrays into bars, dropping rows with any null field,
/// and normalizes to ascending date order.
fn into_bars(result: &ChartResult) -> Vec<DailyBar> {
    let Some(quote) = result.indicators.quote.first() else {
        return Vec::new();
    };

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let row = (
            jst_date_from_epoch(ts),
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        );
        if let (Some(date), Some(open), Some(high), Some(low), Some(close), Some(volume)) = row {
            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }
    }
    bars.sort_by_key(|b| b.date);
    bars
}
