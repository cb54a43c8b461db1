use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use airsense::api::AppState;
use airsense::{AirSenseConfig, AnalysisService, FirecrawlClient, GroqCompletionClient, web};

fn init_tracing(config: &AirSenseConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AirSenseConfig::load()?;
    init_tracing(&config);
    tracing::info!("Starting AirSense v{}", airsense::VERSION);

    let provider = FirecrawlClient::new(&config)?;
    let generator = GroqCompletionClient::new(&config)?;
    let service = AnalysisService::new(Arc::new(provider), Arc::new(generator));

    let state = AppState {
        service: Arc::new(service),
    };

    web::run(config.server.port, state).await
}
