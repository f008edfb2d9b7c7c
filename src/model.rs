// Core structs shared by the analysis and publish steps, plus the error
// taxonomy for each boundary.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One daily OHLCV bar as returned by the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Price history for one sector ETF, bars ascending by date.
/// Immutable once fetched.
#[derive(Debug, Clone)]
pub struct SectorSeries {
    pub code: String,
    pub name: String,
    pub bars: Vec<DailyBar>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    Overheated,
    Undervalued,
    Neutral,
}

/// Latest-day indicator values for one sector. Recomputed fresh each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    /// Previous-day change in percent.
    pub change_pct: f64,
    /// Deviation of the close from the 5-day SMA, percent.
    pub diff_short: f64,
    /// Deviation from the 25-day SMA, percent.
    pub diff_mid: f64,
    /// Deviation from the 75-day SMA, percent.
    pub diff_long: f64,
    pub rsi: f64,
    /// Bollinger %B; 0 when the band has zero width.
    pub pct_b: f64,
    /// Volume vs its 5-day average; 0 when the average is zero.
    pub volume_ratio: f64,
    pub signal: TrendSignal,
}

/// Close series rebased to 100 at the chart window start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorReport {
    pub name: String,
    pub snapshot: IndicatorSnapshot,
    pub series: ChartSeries,
}

/// The full JSON artifact handed from `analyze` to `publish`.
/// BTreeMap keeps the sector codes in ascending order in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub generated_at: String,
    pub sectors: BTreeMap<String, SectorReport>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider rejected request: {0}")]
    Api(String),
    #[error("malformed chart response: {0}")]
    InvalidResponse(String),
    #[error("no bars returned for {0}")]
    NoData(String),
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("insufficient history for {code}: {got} bars, need {need}")]
    InsufficientHistory {
        code: String,
        got: usize,
        need: usize,
    },
    #[error("invalid indicator period: {0}")]
    InvalidPeriod(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("missing WordPress setting: {0}")]
    MissingSetting(&'static str),
    #[error("invalid WordPress page id: {0}")]
    InvalidPageId(String),
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("payload serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("wordpress api error [{status}]: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}
