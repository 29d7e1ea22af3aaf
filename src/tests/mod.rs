use crate::ai::{
    AIError, AnalysisClient, AnalysisProvider, AnalysisResult, Complexity, GenerationRequest,
    SamplingConfig,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;


#[derive(Debug, Clone)]
pub(crate) enum MockReply {
    Text(String),
    NetworkFailure,
}

/// Provider double that counts calls and optionally waits for a release
/// signal before answering.
pub(crate) struct MockProvider {
    reply: MockReply,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl AnalysisProvider for MockProvider {
    async fn generate(&self, _request: &GenerationRequest, _api_key: &str) -> Result<String, AIError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::NetworkFailure => {
                Err(AIError::NetworkError("connection reset by peer".to_string()))
            }
        }
    }
}

// Test utilities and helpers
pub(crate) struct TestUtils;

impl TestUtils {
    pub fn provider(reply: MockReply) -> Arc<MockProvider> {
        Arc::new(MockProvider {
            reply,
            calls: AtomicUsize::new(0),
            gate: None,
        })
    }

    pub fn gated_provider(reply: MockReply, gate: Arc<Notify>) -> Arc<MockProvider> {
        Arc::new(MockProvider {
            reply,
            calls: AtomicUsize::new(0),
            gate: Some(gate),
        })
    }

    pub fn calls(provider: &MockProvider) -> usize {
        provider.calls.load(Ordering::SeqCst)
    }

    pub fn client(provider: Arc<MockProvider>, api_key: Option<&str>) -> AnalysisClient {
        AnalysisClient::new(
            provider,
            api_key.map(str::to_string),
            SamplingConfig::default(),
        )
    }

    pub fn sql_payload() -> String {
        json!({
            "summary": "Missing GROUP BY clause",
            "errorType": "Logical Error",
            "detailedExplanation": "...",
            "technicalDetails": "...",
            "complexity": { "time": "O(n)", "space": "O(n)" },
            "correctedCode": "SELECT name, COUNT(*) FROM users WHERE age > 18 GROUP BY name;",
            "bestPractices": ["Always pair aggregate functions with GROUP BY"]
        })
        .to_string()
    }

    pub fn sql_result() -> AnalysisResult {
        AnalysisResult {
            summary: "Missing GROUP BY clause".to_string(),
            error_type: "Logical Error".to_string(),
            detailed_explanation: "...".to_string(),
            technical_details: "...".to_string(),
            corrected_code: "SELECT name, COUNT(*) FROM users WHERE age > 18 GROUP BY name;"
                .to_string(),
            best_practices: Some(vec![
                "Always pair aggregate functions with GROUP BY".to_string()
            ]),
            complexity: Some(Complexity {
                time: "O(n)".to_string(),
                space: "O(n)".to_string(),
            }),
        }
    }
}
