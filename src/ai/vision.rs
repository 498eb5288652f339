use super::types::{ContentBlock, InferenceConfig, InvokeRequest, Message};
use super::{invoke_json, InferenceService};
use crate::{codec, prompts, Error, Result};

pub const ANALYSIS_MAX_TOKENS: u32 = 1000;

/// Format declared for every uploaded image.
pub const IMAGE_FORMAT: &str = "jpeg";

/// Build the single-turn image analysis request: the image block first, then
/// the fixed analysis instructions.
pub fn build_analysis_request(image_bytes: &[u8]) -> InvokeRequest {
    match codec::sniff_image_format(image_bytes) {
        Some(IMAGE_FORMAT) => {}
        Some(other) => tracing::warn!(
            "Image looks like {} but is declared as {}",
            other,
            IMAGE_FORMAT
        ),
        None => tracing::warn!(
            "Unrecognized image format (first 4 bytes: {:02X?}), declaring as {}",
            &image_bytes[..image_bytes.len().min(4)],
            IMAGE_FORMAT
        ),
    }

    InvokeRequest {
        messages: vec![Message::user(vec![
            ContentBlock::image(IMAGE_FORMAT, codec::encode_image(image_bytes)),
            ContentBlock::text(prompts::IMAGE_ANALYSIS),
        ])],
        inference_config: InferenceConfig {
            max_new_tokens: ANALYSIS_MAX_TOKENS,
        },
    }
}

/// Ask the vision model to describe the image.
pub async fn analyze_image(
    service: &dyn InferenceService,
    model_id: &str,
    image_bytes: &[u8],
) -> Result<String> {
    tracing::debug!("Analyzing image ({} bytes) with {}", image_bytes.len(), model_id);

    let request = build_analysis_request(image_bytes);
    let response = invoke_json(service, model_id, &request).await?;

    let analysis = response
        .first_text()
        .ok_or_else(|| Error::InvalidResponse("No text in image analysis response".to_string()))?
        .to_string();

    if analysis.trim().is_empty() {
        tracing::warn!("Vision model {} returned an empty analysis", model_id);
    }

    Ok(analysis)
}
