//! Nova chat payload types shared by the vision and video-prompt requests.

use serde::{Deserialize, Serialize};

/// Top-level `InvokeModel` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvokeRequest {
    pub messages: Vec<Message>,
    #[serde(rename = "inferenceConfig")]
    pub inference_config: InferenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn user(content: Vec<ContentBlock>) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

/// Untagged union of image and text content blocks.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ContentBlock {
    Image { image: ImageBlock },
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Image block carrying already base64-encoded bytes.
    pub fn image(format: &str, encoded_bytes: String) -> Self {
        Self::Image {
            image: ImageBlock {
                format: format.to_string(),
                source: ImageSource {
                    bytes: encoded_bytes,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageBlock {
    pub format: String,
    pub source: ImageSource,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSource {
    pub bytes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InferenceConfig {
    pub max_new_tokens: u32,
}

/// Top-level `InvokeModel` response envelope.
#[derive(Debug, Deserialize)]
pub struct InvokeResponse {
    pub output: Output,
    #[serde(rename = "stopReason", default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    pub message: OutputMessage,
}

#[derive(Debug, Deserialize)]
pub struct OutputMessage {
    #[serde(default)]
    pub role: Option<String>,
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
pub struct OutputContent {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

impl InvokeResponse {
    /// Text of the first content block that carries any.
    pub fn first_text(&self) -> Option<&str> {
        self.output
            .message
            .content
            .iter()
            .find_map(|c| c.text.as_deref())
    }
}
