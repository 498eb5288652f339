//! Data models and structures
//!
//! Defines the inbound request record, the JSON bodies returned to callers,
//! the proxy-style response envelope, and process configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MODEL_ID: &str = "amazon.nova-pro-v1:0";
pub const DEFAULT_BEDROCK_REGION: &str = "us-east-1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Validated inbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub key: String,
    pub user_text: String,
}

// Loosely typed so that malformed optional fields are ignored rather than rejected.
#[derive(Debug, Deserialize)]
struct RawRequest {
    key: Option<serde_json::Value>,
    #[serde(rename = "userText")]
    user_text: Option<serde_json::Value>,
}

impl AnalyzeRequest {
    /// Parse and validate a JSON request body.
    ///
    /// `key` must be a non-blank string. `userText` defaults to an empty
    /// string when it is missing, `null`, or not a string.
    pub fn from_body(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| Error::Validation(format!("body is not valid JSON: {}", e)))?;

        if !value.is_object() {
            return Err(Error::Validation(
                "body must be a JSON object".to_string(),
            ));
        }

        let raw: RawRequest = serde_json::from_value(value)?;

        let key = match raw.key {
            Some(serde_json::Value::String(key)) if !key.trim().is_empty() => key,
            Some(serde_json::Value::String(_)) => {
                return Err(Error::Validation("field `key` is empty".to_string()))
            }
            Some(serde_json::Value::Null) | None => {
                return Err(Error::Validation(
                    "missing required field `key`".to_string(),
                ))
            }
            Some(other) => {
                return Err(Error::Validation(format!(
                    "field `key` must be a string, got {}",
                    other
                )))
            }
        };

        let user_text = match raw.user_text {
            Some(serde_json::Value::String(text)) => text,
            _ => String::new(),
        };

        Ok(Self { key, user_text })
    }
}

/// Success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub video_prompt: String,
}

/// Failure body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Proxy-style response envelope (`statusCode`, `headers`, `body`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bucket_name: String,
    pub vision_model_id: String,
    pub text_model_id: String,
    pub bedrock_region: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            bucket_name: std::env::var("BUCKET_NAME")
                .map_err(|_| Error::Config("BUCKET_NAME not set".to_string()))?,
            vision_model_id: std::env::var("VISION_MODEL_ID")
                .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            text_model_id: std::env::var("TEXT_MODEL_ID")
                .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            bedrock_region: std::env::var("BEDROCK_REGION")
                .unwrap_or_else(|_| DEFAULT_BEDROCK_REGION.to_string()),
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}
