//! Vision provider trait definition

use crate::{Result, VisionRequest, VisionResponse};
use async_trait::async_trait;

/// Trait for image-understanding providers
///
/// Implementations of this trait provide access to vision-capable models
/// that can describe a price chart (e.g., Gemini).
#[async_trait]
pub trait ChartVisionProvider: Send + Sync {
    /// Describe one chart image
    ///
    /// # Arguments
    ///
    /// * `request` - The image payload, prompt, and generation parameters
    ///
    /// # Returns
    ///
    /// The provider's free-text description. The text may or may not embed
    /// a well-formed JSON analysis; extraction is the caller's concern.
    async fn describe_chart(&self, request: VisionRequest) -> Result<VisionResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}
