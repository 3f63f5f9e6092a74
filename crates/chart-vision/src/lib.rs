//! Vision provider abstraction for chart-analyzer
//!
//! This crate provides provider-agnostic access to image-understanding
//! models that can describe a price chart. It includes:
//!
//! - Request/response types for a single-image description call
//! - Image payload handling (base64, data URLs)
//! - Language selection and the fixed analysis prompts
//! - The [`ChartVisionProvider`] trait
//! - Concrete provider implementations (behind feature flags)
//!
//! The provider returns one text blob per image. Whether that text contains
//! well-formed JSON is the downstream aggregator's problem; the only failure
//! this crate reports is the provider call itself not completing.

pub mod error;
pub mod image;
pub mod language;
pub mod prompt;
pub mod provider;
pub mod request;

// Re-export main types
pub use error::{Result, VisionError};
pub use image::ImageData;
pub use language::Language;
pub use prompt::analysis_prompt;
pub use provider::ChartVisionProvider;
pub use request::{VisionRequest, VisionRequestBuilder, VisionResponse};

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
