//! Model inference integration
//!
//! Wraps the Bedrock Runtime `InvokeModel` operation behind
//! [`InferenceService`] and builds the two Nova requests the pipeline sends:
//! an image analysis and a video-prompt generation.

pub mod bedrock;
pub mod mock;
pub mod types;
pub mod video_prompt;
pub mod vision;

pub use bedrock::BedrockClient;
pub use mock::MockInferenceClient;
pub use types::{InvokeRequest, InvokeResponse};

use crate::{Error, Result};
use async_trait::async_trait;

#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Send a serialized request body to `model_id` and return the raw response body.
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

/// Serialize `request`, invoke the model and decode the Nova response envelope.
pub async fn invoke_json(
    service: &dyn InferenceService,
    model_id: &str,
    request: &InvokeRequest,
) -> Result<InvokeResponse> {
    let body = serde_json::to_vec(request)?;
    tracing::debug!(
        "Invoking model {} with {} byte request ({} max tokens)",
        model_id,
        body.len(),
        request.inference_config.max_new_tokens
    );

    let raw = service.invoke_model(model_id, body).await?;

    let response: InvokeResponse = serde_json::from_slice(&raw).map_err(|e| {
        tracing::error!(
            "Failed to parse model response: {}\nBody: {}",
            e,
            String::from_utf8_lossy(&raw)
        );
        Error::InvalidResponse(format!("Failed to parse model response: {}", e))
    })?;

    if let Some(usage) = &response.usage {
        tracing::debug!(
            "Model {} usage: input_tokens={:?} output_tokens={:?}",
            model_id,
            usage.input_tokens,
            usage.output_tokens
        );
    }
    if response.stop_reason.as_deref() == Some("max_tokens") {
        tracing::warn!("Model {} stopped at the token limit; output may be cut short", model_id);
    }

    Ok(response)
}
