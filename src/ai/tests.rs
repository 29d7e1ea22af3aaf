#[cfg(test)]
mod tests {
    use crate::ai::{AIError, AnalysisClient, AnalysisRequest, GeminiProvider, SamplingConfig};
    use crate::config::{AIConfig, Config};
    use crate::language::Language;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::{json, Value};
    use std::sync::Arc;

    const ENDPOINT: &str = "/models/gemini-test:generateContent";

    async fn setup_test_server() -> (ServerGuard, Config) {
        let server = Server::new_async().await;

        // Create config with mock server URL
        let config = Config {
            ai: AIConfig {
                model: "gemini-test".to_string(),
                api_url: Some(server.url()),
                ..AIConfig::default()
            },
            ..Config::default()
        };

        (server, config)
    }

    fn client(config: &Config) -> AnalysisClient {
        AnalysisClient::from_config(config, Some("test_key".to_string())).unwrap()
    }

    fn analysis_payload() -> Value {
        json!({
            "summary": "Missing GROUP BY clause",
            "errorType": "Logical Error",
            "detailedExplanation": "You counted rows but never said how to group them.",
            "technicalDetails": "Non-aggregated columns must appear in GROUP BY.",
            "complexity": { "time": "O(n)", "space": "O(n)" },
            "correctedCode": "SELECT name, COUNT(*) FROM users WHERE age > 18 GROUP BY name;",
            "bestPractices": ["Always pair aggregate functions with GROUP BY"]
        })
    }

    fn gemini_body(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 80 }
        })
        .to_string()
    }

    fn sql_request() -> AnalysisRequest {
        AnalysisRequest::new(Language::Sql.default_snippet(), Language::Sql)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_successful_structured_response() {
        let (mut server, config) = setup_test_server().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .match_header("x-goog-api-key", "test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(gemini_body(&analysis_payload().to_string()))
            .create_async()
            .await;

        let result = client(&config).analyze(&sql_request()).await.unwrap();
        assert_eq!(result.error_type, "Logical Error");
        assert_eq!(
            result.corrected_code,
            "SELECT name, COUNT(*) FROM users WHERE age > 18 GROUP BY name;"
        );
        assert_eq!(result.complexity.unwrap().time, "O(n)");
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_request_body_declares_schema_and_sampling() {
        let (mut server, config) = setup_test_server().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .match_body(Matcher::PartialJson(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "temperature": 0.1,
                    "thinkingConfig": { "thinkingBudget": 2048 },
                    "responseSchema": {
                        "type": "OBJECT",
                        "properties": {
                            "complexity": { "type": "OBJECT" },
                            "bestPractices": { "type": "ARRAY" }
                        }
                    }
                }
            })))
            .with_status(200)
            .with_body(gemini_body(&analysis_payload().to_string()))
            .create_async()
            .await;

        let result = client(&config).analyze(&sql_request()).await;
        assert!(result.is_ok(), "unexpected error: {:?}", result.err());
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_prompt_embeds_fenced_code() {
        let (mut server, config) = setup_test_server().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .match_body(Matcher::Regex("```sql\\\\nSELECT name, COUNT".to_string()))
            .with_status(200)
            .with_body(gemini_body(&analysis_payload().to_string()))
            .create_async()
            .await;

        assert!(client(&config).analyze(&sql_request()).await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_thought_parts_are_skipped() {
        let (mut server, config) = setup_test_server().await;

        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Let me think about GROUP BY...", "thought": true },
                    { "text": analysis_payload().to_string() }
                ]}
            }]
        });
        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let result = client(&config).analyze(&sql_request()).await.unwrap();
        assert_eq!(result.summary, "Missing GROUP BY clause");
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_server_error_is_api_error() {
        let (mut server, config) = setup_test_server().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(500)
            .with_body(r#"{"error": {"message": "internal"}}"#)
            .expect(1)
            .create_async()
            .await;

        let result = client(&config).analyze(&sql_request()).await;
        assert!(matches!(result, Err(AIError::APIError(_))));
        // No retries: exactly one request reached the server.
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_rate_limit_and_auth_failures() {
        for status in [401, 403, 429] {
            let (mut server, config) = setup_test_server().await;
            let mock = server
                .mock("POST", ENDPOINT)
                .with_status(status)
                .create_async()
                .await;

            let result = client(&config).analyze(&sql_request()).await;
            assert!(matches!(result, Err(AIError::APIError(_))), "status {}", status);
            mock.assert_async().await;
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_candidates_is_empty_response() {
        let (mut server, config) = setup_test_server().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body(json!({ "candidates": [] }).to_string())
            .create_async()
            .await;

        let result = client(&config).analyze(&sql_request()).await;
        assert!(matches!(result, Err(AIError::EmptyResponse(_))));
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_candidate_without_text_is_empty_response() {
        let (mut server, config) = setup_test_server().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body(json!({ "candidates": [{ "finishReason": "SAFETY" }] }).to_string())
            .create_async()
            .await;

        match client(&config).analyze(&sql_request()).await {
            Err(AIError::EmptyResponse(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("expected empty response, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unparsable_model_text_is_parse_error() {
        let (mut server, config) = setup_test_server().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body(gemini_body("Sure! Here is your analysis: it is broken."))
            .create_async()
            .await;

        let result = client(&config).analyze(&sql_request()).await;
        assert!(matches!(result, Err(AIError::ParseError(_))));
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_missing_key_never_reaches_server() {
        let (mut server, config) = setup_test_server().await;

        let mock = server
            .mock("POST", ENDPOINT)
            .expect(0)
            .create_async()
            .await;

        let provider = GeminiProvider::new(&config.ai).unwrap();
        for key in [None, Some("   ".to_string())] {
            let client = AnalysisClient::new(Arc::new(provider.clone()), key, SamplingConfig::default());
            assert!(!client.has_credential());
            let result = client.analyze(&sql_request()).await;
            assert!(matches!(result, Err(AIError::ConfigurationError(_))));
        }
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unreachable_host_is_network_error() {
        let config = Config {
            ai: AIConfig {
                model: "gemini-test".to_string(),
                api_url: Some("http://127.0.0.1:9".to_string()),
                timeout_seconds: Some(5),
                ..AIConfig::default()
            },
            ..Config::default()
        };

        let result = client(&config).analyze(&sql_request()).await;
        assert!(matches!(result, Err(AIError::NetworkError(_))));
    }

    #[test]
    fn test_endpoint_joins_model_path() {
        let ai = AIConfig {
            model: "gemini-3-pro-preview".to_string(),
            api_url: Some("https://example.test/v1beta/".to_string()),
            ..AIConfig::default()
        };
        let provider = GeminiProvider::new(&ai).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://example.test/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }
}
