//! Request orchestration: fetch, analyze, prompt, respond.

use crate::ai::{video_prompt, vision, BedrockClient, InferenceService};
use crate::models::{AnalyzeRequest, AnalyzeResponse, Config, ErrorResponse, HandlerResponse};
use crate::storage::{ObjectStore, S3ObjectStore};
use crate::Result;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{error, info, Instrument};
use uuid::Uuid;

/// Model identifiers for the two inference calls.
#[derive(Debug, Clone)]
pub struct ModelIds {
    pub vision: String,
    pub text: String,
}

/// Runs one analyze request end to end against injected services.
pub struct Orchestrator {
    store: Box<dyn ObjectStore>,
    inference: Box<dyn InferenceService>,
    models: ModelIds,
}

/// Injectable service bundle used to construct [`Orchestrator`] in tests/harnesses.
pub struct OrchestratorServices {
    pub store: Box<dyn ObjectStore>,
    pub inference: Box<dyn InferenceService>,
}

impl Orchestrator {
    pub fn with_services(services: OrchestratorServices, models: ModelIds) -> Self {
        Self {
            store: services.store,
            inference: services.inference,
            models,
        }
    }

    /// Construct an orchestrator backed by S3 and Bedrock from configuration.
    pub async fn new(config: &Config) -> Self {
        info!(
            "Image bucket: {} | vision model: {} | text model: {} | region: {}",
            config.bucket_name, config.vision_model_id, config.text_model_id, config.bedrock_region
        );

        let store = Box::new(S3ObjectStore::new(config.bucket_name.clone()).await);
        let inference = Box::new(BedrockClient::new(config.bedrock_region.clone()).await);

        Self::with_services(
            OrchestratorServices { store, inference },
            ModelIds {
                vision: config.vision_model_id.clone(),
                text: config.text_model_id.clone(),
            },
        )
    }

    /// Handle a raw request body, turning every failure into the error envelope.
    pub async fn handle(&self, body: &str) -> HandlerResponse {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("analyze", %request_id);

        async {
            let started = Instant::now();
            match self.process(body).await {
                Ok(response) => {
                    info!("Request succeeded in {} ms", started.elapsed().as_millis());
                    success_response(&response)
                }
                Err(e) => {
                    error!("Request failed after {} ms: {}", started.elapsed().as_millis(), e);
                    error_response(&e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Run the pipeline for a raw request body.
    pub async fn process(&self, body: &str) -> Result<AnalyzeResponse> {
        tracing::debug!("Received body ({} bytes)", body.len());

        let request = AnalyzeRequest::from_body(body)?;
        info!(
            "Processing key: {}, user_text: {} characters",
            request.key,
            request.user_text.chars().count()
        );

        self.run(&request).await
    }

    /// Run the pipeline for an already validated request.
    pub async fn run(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        let step = Instant::now();
        let image = self.store.get_object(&request.key).await?;
        info!(
            "Retrieved image from storage, size: {} bytes ({} ms)",
            image.len(),
            step.elapsed().as_millis()
        );

        let step = Instant::now();
        let analysis =
            vision::analyze_image(self.inference.as_ref(), &self.models.vision, &image).await?;
        drop(image);
        info!(
            "Image analysis completed, length: {} characters ({} ms)",
            analysis.chars().count(),
            step.elapsed().as_millis()
        );

        let step = Instant::now();
        let video_prompt = video_prompt::generate_video_prompt(
            self.inference.as_ref(),
            &self.models.text,
            &analysis,
            &request.user_text,
        )
        .await?;
        info!(
            "Final prompt length: {} characters ({} ms)",
            video_prompt.chars().count(),
            step.elapsed().as_millis()
        );

        Ok(AnalyzeResponse {
            analysis,
            video_prompt,
        })
    }
}

/// CORS headers sent on preflight and successful responses.
pub fn cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        ),
        (
            "Access-Control-Allow-Methods".to_string(),
            "POST, OPTIONS".to_string(),
        ),
    ])
}

fn json_body<T: serde::Serialize>(value: &T) -> String {
    // Plain string-field structs always serialize.
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn success_response(response: &AnalyzeResponse) -> HandlerResponse {
    let mut headers = cors_headers();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    HandlerResponse {
        status_code: 200,
        headers,
        body: json_body(response),
    }
}

pub fn error_response(message: &str) -> HandlerResponse {
    let headers = BTreeMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]);

    HandlerResponse {
        status_code: 500,
        headers,
        body: json_body(&ErrorResponse {
            error: message.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockInferenceClient;
    use crate::storage::MockObjectStore;
    use crate::Error;

    fn orchestrator(store: MockObjectStore, inference: MockInferenceClient) -> Orchestrator {
        Orchestrator::with_services(
            OrchestratorServices {
                store: Box::new(store),
                inference: Box::new(inference),
            },
            ModelIds {
                vision: "vision-model".to_string(),
                text: "text-model".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_process_runs_both_model_calls_in_order() {
        let store = MockObjectStore::new().with_object("cat.jpg".to_string(), vec![0xFF, 0xD8, 0xFF]);
        let inference = MockInferenceClient::new()
            .with_text_response("a cat".to_string())
            .with_text_response("  a cat stretches at dawn  ".to_string());

        let result = orchestrator(store, inference.clone())
            .process(r#"{"key": "cat.jpg", "userText": "slow motion"}"#)
            .await
            .unwrap();

        assert_eq!(result.analysis, "a cat");
        assert_eq!(result.video_prompt, "a cat stretches at dawn");

        let requests = inference.get_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "vision-model");
        assert_eq!(requests[1].0, "text-model");
        let text = requests[1].1["messages"][0]["content"][0]["text"]
            .as_str()
            .unwrap();
        assert!(text.contains("\"a cat\""));
        assert!(text.contains("\"slow motion\""));
    }

    #[tokio::test]
    async fn test_validation_failure_touches_no_service() {
        let store = MockObjectStore::new();
        let inference = MockInferenceClient::new();

        let err = orchestrator(store.clone(), inference.clone())
            .process(r#"{"userText": "x"}"#)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.get_read_count(), 0);
        assert_eq!(inference.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_handle_maps_failures_to_error_envelope() {
        let response = orchestrator(MockObjectStore::new(), MockInferenceClient::new())
            .handle(r#"{"key": "missing.jpg"}"#)
            .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert!(!response.headers.contains_key("Access-Control-Allow-Methods"));

        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert!(body["error"].as_str().unwrap().contains("missing.jpg"));
        assert!(body.get("analysis").is_none());
    }

    #[test]
    fn test_success_response_headers() {
        let response = success_response(&AnalyzeResponse {
            analysis: "a".to_string(),
            video_prompt: "b".to_string(),
        });

        assert!(response.is_success());
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
        assert_eq!(response.headers["Access-Control-Allow-Methods"], "POST, OPTIONS");
        assert_eq!(response.body, r#"{"analysis":"a","videoPrompt":"b"}"#);
    }
}
