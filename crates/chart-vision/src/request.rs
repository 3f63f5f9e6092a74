//! Vision request and response types

use crate::image::ImageData;
use serde::{Deserialize, Serialize};

/// Request for a single-image chart description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// The chart image to describe
    pub image: ImageData,

    /// Analysis prompt sent alongside the image
    pub prompt: String,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response from a chart description call
///
/// One text blob per image; no partial or streaming results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionResponse {
    /// The model's full text output
    pub text: String,
}

impl VisionRequest {
    /// Create a builder for vision requests
    pub fn builder(model: impl Into<String>, image: ImageData) -> VisionRequestBuilder {
        VisionRequestBuilder::new(model, image)
    }
}

/// Builder for VisionRequest
pub struct VisionRequestBuilder {
    model: String,
    image: ImageData,
    prompt: String,
    max_tokens: usize,
    temperature: Option<f32>,
}

impl VisionRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>, image: ImageData) -> Self {
        Self {
            model: model.into(),
            image,
            prompt: String::new(),
            max_tokens: 2048,
            temperature: None,
        }
    }

    /// Set the analysis prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the maximum tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the vision request
    pub fn build(self) -> VisionRequest {
        VisionRequest {
            model: self.model,
            image: self.image,
            prompt: self.prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let image = ImageData::from_bytes("image/png", b"bytes");
        let request = VisionRequest::builder("gemini-1.5-pro", image)
            .prompt("Describe this chart")
            .max_tokens(4096)
            .temperature(0.2)
            .build();

        assert_eq!(request.model, "gemini-1.5-pro");
        assert_eq!(request.prompt, "Describe this chart");
        assert_eq!(request.max_tokens, 4096);
        assert_eq!(request.temperature, Some(0.2));
    }

    #[test]
    fn test_builder_defaults() {
        let image = ImageData::from_bytes("image/png", b"bytes");
        let request = VisionRequest::builder("gemini-1.5-pro", image).build();
        assert_eq!(request.max_tokens, 2048);
        assert!(request.temperature.is_none());
    }
}
