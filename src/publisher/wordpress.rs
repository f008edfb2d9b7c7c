// WordPress REST client. One request, no retries: tomorrow's run is the
// retry mechanism.
use crate::config::WordPressConfig;
use crate::model::PublishError;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

pub struct WordPressPublisher {
    client: Client,
    config: WordPressConfig,
}

impl WordPressPublisher {
    pub fn new(config: WordPressConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to create HTTP client");
        Self { client, config }
    }

    fn page_url(&self) -> String {
        format!(
            "{}/wp-json/wp/v2/pages/{}",
            self.config.site_url, self.config.page_id
        )
    }

    /// Replaces the page content via the pages endpoint, authenticated with
    /// the application password. Anything but a 2xx is fatal to the caller.
    pub async fn update_page(&self, content: &str) -> Result<(), PublishError> {
        let url = self.page_url();
        info!("📤 Updating WordPress page: {}", url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            return Err(PublishError::Api { status, body });
        }
        info!("✅ WordPress page updated [{}]", status);
        Ok(())
    }
}
