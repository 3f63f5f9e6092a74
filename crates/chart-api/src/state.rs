//! Shared application state

use chart_engine::ChartAnalyzer;
use std::sync::Arc;

/// State shared across request handlers
///
/// The analyzer is stateless per call, so one instance serves every
/// concurrent request without locking.
#[derive(Clone)]
pub struct AppState {
    /// The analysis engine, ready to serve requests
    pub analyzer: Arc<ChartAnalyzer>,
}

impl AppState {
    /// Create state around an analyzer
    pub fn new(analyzer: ChartAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}
