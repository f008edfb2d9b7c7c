// Publish step: read the report payload, render the HTML page, update the
// WordPress page. All-or-nothing; any failure exits non-zero.
use sector_pulse::config::{WordPressConfig, report_path};
use sector_pulse::payload::load_payload;
use sector_pulse::publisher::WordPressPublisher;
use sector_pulse::report::render_report;
use std::path::Path;
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let path = report_path();
    let payload = match load_payload(Path::new(&path)) {
        Ok(p) => p,
        Err(e) => {
            error!("Cannot read {}: {}", path, e);
            process::exit(1);
        }
    };
    info!(
        "Rendering report for {} sectors (generated {})",
        payload.sectors.len(),
        payload.generated_at
    );
    let html = render_report(&payload);

    let wp_config = match WordPressConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("WordPress config error: {}", e);
            process::exit(1);
        }
    };
    let publisher = WordPressPublisher::new(wp_config);
    if let Err(e) = publisher.update_page(&html).await {
        error!("❌ Publish failed: {}", e);
        process::exit(1);
    }
    info!("✅ Report published");
}
