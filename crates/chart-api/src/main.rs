//! Chart analysis API server
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="your-key"
//! export CHART_MODEL="gemini-1.5-pro"   # optional
//! export PORT=3000                      # optional
//!
//! cargo run -p chart-api
//! ```

use chart_api::{AppState, router};
use chart_engine::{AnalyzerConfig, ChartAnalyzer};
use chart_vision::Language;
use chart_vision::providers::GeminiProvider;
use std::env;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    chart_utils::init_tracing();

    let provider = Arc::new(GeminiProvider::from_env()?);

    let mut config = AnalyzerConfig::builder();
    if let Ok(model) = env::var("CHART_MODEL") {
        config = config.model(model);
    }
    if let Ok(language) = env::var("CHART_LANGUAGE") {
        config = config.language(Language::from_code(&language));
    }
    let analyzer = ChartAnalyzer::new(provider, config.build()?);

    let state = AppState::new(analyzer);
    let app = router(state);

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("chart-api listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
