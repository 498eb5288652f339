use super::types::{ContentBlock, InferenceConfig, InvokeRequest, Message};
use super::{invoke_json, InferenceService};
use crate::{prompts, Error, Result};

pub const VIDEO_PROMPT_MAX_TOKENS: u32 = 2500;

/// Upper bound on the returned prompt, counted in characters.
pub const MAX_PROMPT_CHARS: usize = 3500;

const ELLIPSIS: &str = "...";

pub fn build_video_prompt_request(analysis: &str, user_text: &str) -> InvokeRequest {
    let text = prompts::render(
        prompts::VIDEO_PROMPT,
        &[("analysis", analysis), ("user_text", user_text)],
    );

    InvokeRequest {
        messages: vec![Message::user(vec![ContentBlock::text(text)])],
        inference_config: InferenceConfig {
            max_new_tokens: VIDEO_PROMPT_MAX_TOKENS,
        },
    }
}

/// Trim surrounding whitespace and cap the prompt at [`MAX_PROMPT_CHARS`].
///
/// Over-long prompts keep their first `MAX_PROMPT_CHARS - 3` characters
/// followed by `...`, so the result is exactly `MAX_PROMPT_CHARS` long.
pub fn bound_prompt(raw: &str) -> String {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();

    if length <= MAX_PROMPT_CHARS {
        return trimmed.to_string();
    }

    let keep = MAX_PROMPT_CHARS - ELLIPSIS.len();
    let mut bounded: String = trimmed.chars().take(keep).collect();
    bounded.push_str(ELLIPSIS);
    tracing::info!("Trimmed prompt from {} to {} characters", length, MAX_PROMPT_CHARS);
    bounded
}

/// Ask the text model for a cinematic video prompt built from the image
/// analysis and the caller's request.
pub async fn generate_video_prompt(
    service: &dyn InferenceService,
    model_id: &str,
    analysis: &str,
    user_text: &str,
) -> Result<String> {
    let request = build_video_prompt_request(analysis, user_text);
    let response = invoke_json(service, model_id, &request).await?;

    let generated = response.first_text().ok_or_else(|| {
        Error::InvalidResponse("No text in video prompt response".to_string())
    })?;
    tracing::info!(
        "Generated prompt length: {} characters",
        generated.trim().chars().count()
    );

    Ok(bound_prompt(generated))
}
