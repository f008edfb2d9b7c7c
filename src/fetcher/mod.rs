pub mod yahoo;

use crate::model::{DailyBar, FetchError};

#[async_trait::async_trait]
pub trait BarSource: Send + Sync {
    /// Fetches the daily bars for one sector code, ascending by date.
    async fn fetch_daily(&self, code: &str) -> Result<Vec<DailyBar>, FetchError>;
}

pub use yahoo::YahooFetcher;
