use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

mod error;
pub mod gemini;
pub mod prompt;
mod response;
pub mod schema;
mod tests;

pub use error::{AIError, GENERIC_FAILURE_MESSAGE};
pub use gemini::GeminiProvider;
pub use prompt::{build_prompt, GenerationRequest, SamplingConfig};
pub use response::{AnalysisRequest, AnalysisResult, Complexity, EMPTY_CODE_MESSAGE};

use crate::config::Config;

pub const MISSING_KEY_MESSAGE: &str =
    "API key is not configured. Set GEMINI_API_KEY or add ai.api_key to the config file.";

/// A model endpoint that answers one structured-output request with raw text.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn generate(&self, request: &GenerationRequest, api_key: &str) -> Result<String, AIError>;
}

/// Issues exactly one provider call per analysis. No retries, no caching.
#[derive(Clone)]
pub struct AnalysisClient {
    provider: Arc<dyn AnalysisProvider>,
    api_key: Option<String>,
    sampling: SamplingConfig,
}

impl AnalysisClient {
    pub fn new(
        provider: Arc<dyn AnalysisProvider>,
        api_key: Option<String>,
        sampling: SamplingConfig,
    ) -> Self {
        Self {
            provider,
            api_key,
            sampling,
        }
    }

    pub fn from_config(config: &Config, api_key: Option<String>) -> Result<Self, AIError> {
        let provider = GeminiProvider::new(&config.ai)?;
        Ok(Self::new(Arc::new(provider), api_key, config.ai.sampling()))
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AIError> {
        let api_key = self
            .credential()
            .ok_or_else(|| AIError::ConfigurationError(MISSING_KEY_MESSAGE.to_string()))?;
        request.check()?;

        let generation = GenerationRequest::new(request, &self.sampling)?;
        debug!(
            language = request.language.id(),
            code_len = request.code.len(),
            "Requesting analysis"
        );

        let outcome = match self.provider.generate(&generation, api_key).await {
            Ok(text) => AnalysisResult::from_json(&text),
            Err(e) => Err(e),
        };

        outcome.map_err(|e| {
            error!("Analysis failed: {}", e);
            e
        })
    }
}
