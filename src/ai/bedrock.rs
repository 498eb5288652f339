use super::InferenceService;
use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client as BedrockRuntimeClient;

/// Bedrock Runtime client pinned to one region.
pub struct BedrockClient {
    client: BedrockRuntimeClient,
}

impl BedrockClient {
    pub async fn new(region: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;

        Self::from_client(BedrockRuntimeClient::new(&config))
    }

    pub fn from_client(client: BedrockRuntimeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InferenceService for BedrockClient {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to invoke Bedrock model {}: {}",
                    model_id,
                    DisplayErrorContext(&e)
                );
                Error::Inference(format!(
                    "Failed to invoke model {}: {}",
                    model_id,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(response.body.into_inner())
    }
}
