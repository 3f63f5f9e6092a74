//! HTTP boundary for chart-analyzer
//!
//! A thin axum layer over the analysis engine:
//!
//! - `POST /api/analyze`: multipart upload (`file` + optional `language`),
//!   validated here (presence, image media type, size cap) before the
//!   engine ever sees it
//! - `GET /health`: liveness probe
//!
//! Every response uses the `{success, data | error}` envelope. Client-side
//! input problems come back as 400; a failed provider call as 500. The
//! engine's degraded-input path never reaches an error response - it
//! produces a complete analysis.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResponse};
pub use routes::router;
pub use state::AppState;

/// Largest accepted upload, in bytes (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
