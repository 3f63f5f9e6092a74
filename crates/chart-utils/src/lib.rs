//! Shared utilities for chart-analyzer

pub mod format;
pub mod logging;

pub use format::{format_price_level, percentage_change};
pub use logging::init_tracing;
