//! Analyzer orchestration
//!
//! [`ChartAnalyzer`] ties the provider call to the aggregator. It holds an
//! explicitly constructed provider handle, never process-wide state, and is
//! stateless across calls: concurrent analyses share nothing mutable.
//!
//! Failure semantics follow the two-tier taxonomy: a provider failure is
//! fatal and propagates unmodified; anything wrong with the provider's
//! *content* is absorbed by [`analysis_from_text`] and still yields a
//! complete analysis.

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::normalize::analysis_from_text;
use chart_core::ChartAnalysis;
use chart_vision::{ChartVisionProvider, ImageData, Language, VisionRequest, analysis_prompt};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Single-shot chart analyzer over a vision provider
pub struct ChartAnalyzer {
    provider: Arc<dyn ChartVisionProvider>,
    config: AnalyzerConfig,
}

impl ChartAnalyzer {
    /// Create an analyzer over the given provider
    pub fn new(provider: Arc<dyn ChartVisionProvider>, config: AnalyzerConfig) -> Self {
        Self { provider, config }
    }

    /// Analyze one chart image in the configured language
    pub async fn analyze_image(&self, image: ImageData) -> Result<ChartAnalysis> {
        let language = self.config.language.clone();
        self.analyze_image_in(image, &language).await
    }

    /// Analyze one chart image, overriding the response language
    ///
    /// The provider call is the only suspension point and the only failure
    /// path; no retries are attempted. On success the returned analysis is
    /// complete and schema-valid even when the provider's text contained
    /// no usable JSON. `image_url` is left empty for the caller to bind.
    #[instrument(skip(self, image), fields(provider = %self.provider.name(), model = %self.config.model))]
    pub async fn analyze_image_in(
        &self,
        image: ImageData,
        language: &Language,
    ) -> Result<ChartAnalysis> {
        let mut request = VisionRequest::builder(self.config.model.clone(), image)
            .prompt(analysis_prompt(language))
            .max_tokens(self.config.max_tokens);
        if let Some(temperature) = self.config.temperature {
            request = request.temperature(temperature);
        }

        let response = self.provider.describe_chart(request.build()).await?;
        debug!("provider returned {} chars of analysis text", response.text.len());

        Ok(analysis_from_text(&response.text))
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The analyzer's configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chart_core::{TradeAction, Trend};
    use chart_vision::{VisionError, VisionResponse};
    use mockall::mock;
    use mockall::predicate::always;

    mock! {
        Provider {}

        #[async_trait]
        impl ChartVisionProvider for Provider {
            async fn describe_chart(
                &self,
                request: VisionRequest,
            ) -> chart_vision::Result<VisionResponse>;

            fn name(&self) -> &str;
        }
    }

    fn test_image() -> ImageData {
        ImageData::from_bytes("image/png", b"fake chart")
    }

    fn analyzer_with(provider: MockProvider) -> ChartAnalyzer {
        ChartAnalyzer::new(Arc::new(provider), AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn test_well_formed_response_is_normalized() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_describe_chart()
            .with(always())
            .returning(|_| {
                Ok(VisionResponse {
                    text: r#"{"trend": "BULLISH", "confidence": 80}"#.to_string(),
                })
            });

        let analysis = analyzer_with(provider)
            .analyze_image(test_image())
            .await
            .unwrap();

        assert_eq!(analysis.trend, Trend::Bullish);
        assert_eq!(analysis.confidence, 80);
        assert_eq!(
            analysis.raw_analysis,
            r#"{"trend": "BULLISH", "confidence": 80}"#
        );
    }

    #[tokio::test]
    async fn test_prose_response_degrades_not_errors() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider.expect_describe_chart().returning(|_| {
            Ok(VisionResponse {
                text: "I cannot make out any chart in this image.".to_string(),
            })
        });

        let analysis = analyzer_with(provider)
            .analyze_image(test_image())
            .await
            .unwrap();

        assert_eq!(analysis.trend, Trend::Sideways);
        assert_eq!(analysis.recommendation.action, TradeAction::Hold);
        assert_eq!(
            analysis.raw_analysis,
            "I cannot make out any chart in this image."
        );
    }

    #[tokio::test]
    async fn test_provider_failure_is_fatal_and_distinguishable() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_describe_chart()
            .returning(|_| Err(VisionError::RequestFailed("timeout".to_string())));

        let result = analyzer_with(provider).analyze_image(test_image()).await;

        // No ChartAnalysis is emitted; the failure must not silently
        // resolve to a default analysis.
        let err = result.unwrap_err();
        assert!(matches!(err, crate::EngineError::Provider(_)));
    }

    #[tokio::test]
    async fn test_prompt_matches_configured_language() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_describe_chart()
            .withf(|request| request.prompt.contains("Analyze this price chart"))
            .returning(|_| {
                Ok(VisionResponse {
                    text: "{}".to_string(),
                })
            });

        let config = AnalyzerConfig::builder()
            .language(chart_vision::Language::English)
            .build()
            .unwrap();
        let analyzer = ChartAnalyzer::new(Arc::new(provider), config);

        analyzer.analyze_image(test_image()).await.unwrap();
    }
}
