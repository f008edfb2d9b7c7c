use crate::model::ConfigError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Indicator periods and classification thresholds. Every field has a
/// compiled default so `config.json` only needs the overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_width: f64,
    pub sma_short_period: usize,
    pub sma_mid_period: usize,
    pub sma_long_period: usize,
    pub volume_sma_period: usize,
    pub overheated_rsi: f64,
    pub overheated_pct_b: f64,
    pub undervalued_rsi: f64,
    pub undervalued_pct_b: f64,
    /// Trading days shown in the chart.
    pub chart_window: usize,
    /// Pause between provider requests.
    pub fetch_delay_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_width: 2.0,
            sma_short_period: 5,
            sma_mid_period: 25,
            sma_long_period: 75,
            volume_sma_period: 5,
            overheated_rsi: 70.0,
            overheated_pct_b: 1.0,
            undervalued_rsi: 30.0,
            undervalued_pct_b: 0.0,
            chart_window: 120,
            fetch_delay_ms: 500,
        }
    }
}

impl AnalysisConfig {
    /// Bars required before a sector can be analyzed: a full long-SMA window
    /// plus the previous close for the day-over-day change.
    pub fn min_bars(&self) -> usize {
        self.sma_long_period + 1
    }
}

/// Loads the analysis configuration; a missing file means defaults.
pub fn load_config(path: &str) -> Result<AnalysisConfig, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(AnalysisConfig::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    let config: AnalysisConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Path of the JSON artifact handed from `analyze` to `publish`.
pub fn report_path() -> String {
    env::var("REPORT_PATH").unwrap_or_else(|_| "report.json".to_string())
}

#[derive(Debug, Clone)]
pub struct WordPressConfig {
    pub site_url: String,
    pub user: String,
    pub password: String,
    pub page_id: u64,
}

impl WordPressConfig {
    /// Reads the WordPress settings from WP_URL / WP_USER / WP_PASSWORD /
    /// WP_PAGE_ID. A TOFU_WORDPRESS bundle (KEY=VALUE per line) overrides
    /// the individual variables when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut raw = RawWordPress {
            url: env::var("WP_URL").ok(),
            user: env::var("WP_USER").ok(),
            password: env::var("WP_PASSWORD").ok(),
            page_id: env::var("WP_PAGE_ID").ok(),
        };
        if let Ok(bundle) = env::var("TOFU_WORDPRESS") {
            raw.apply_bundle(&bundle);
        }
        raw.finish()
    }
}

#[derive(Debug, Default)]
struct RawWordPress {
    url: Option<String>,
    user: Option<String>,
    password: Option<String>,
    page_id: Option<String>,
}

impl RawWordPress {
    fn apply_bundle(&mut self, bundle: &str) {
        for line in bundle.lines() {
            let line = line.trim();
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                "WP_URL" => self.url = Some(value),
                "WP_USER" => self.user = Some(value),
                "WP_PASSWORD" => self.password = Some(value),
                "WP_PAGE_ID" => self.page_id = Some(value),
                _ => {}
            }
        }
    }

    fn finish(self) -> Result<WordPressConfig, ConfigError> {
        let site_url = self
            .url
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingSetting("WP_URL"))?;
        let user = self
            .user
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingSetting("WP_USER"))?;
        let password = self
            .password
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingSetting("WP_PASSWORD"))?;
        let page_id = self
            .page_id
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingSetting("WP_PAGE_ID"))?;
        let page_id = page_id
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidPageId(page_id))?;
        Ok(WordPressConfig {
            site_url: site_url.trim_end_matches('/').to_string(),
            user,
            password,
            page_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_config_missing() {
        let config = load_config("definitely-not-here.json").unwrap();
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.min_bars(), 76);
    }

    #[test]
    fn bundle_overrides_individual_values() {
        let mut raw = RawWordPress {
            url: Some("https://old.example.com".into()),
            user: Some("old".into()),
            password: Some("old-pass".into()),
            page_id: Some("1".into()),
        };
        raw.apply_bundle(
            "WP_URL = https://blog.example.com/\nWP_USER=tofu\n\nnot-a-pair\nWP_PAGE_ID=42\n",
        );
        let config = raw.finish().unwrap();
        assert_eq!(config.site_url, "https://blog.example.com");
        assert_eq!(config.user, "tofu");
        // untouched keys keep the individual value
        assert_eq!(config.password, "old-pass");
        assert_eq!(config.page_id, 42);
    }

    #[test]
    fn missing_setting_is_an_error() {
        let raw = RawWordPress {
            url: Some("https://blog.example.com".into()),
            user: None,
            password: Some("pass".into()),
            page_id: Some("7".into()),
        };
        assert!(matches!(
            raw.finish(),
            Err(ConfigError::MissingSetting("WP_USER"))
        ));
    }

    #[test]
    fn non_numeric_page_id_is_an_error() {
        let raw = RawWordPress {
            url: Some("https://blog.example.com".into()),
            user: Some("tofu".into()),
            password: Some("pass".into()),
            page_id: Some("about".into()),
        };
        assert!(matches!(raw.finish(), Err(ConfigError::InvalidPageId(_))));
    }
}
