use super::InferenceService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum MockReply {
    Body(Vec<u8>),
    Failure(String),
}

/// Scripted inference service.
///
/// Replies are handed out in the order they were added and cycle once
/// exhausted. Without any scripted reply, every call answers with a Nova
/// envelope whose text is `Mock response <n>`.
#[derive(Clone)]
pub struct MockInferenceClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Wraps `text` in a well-formed Nova response envelope.
    pub fn with_text_response(self, text: String) -> Self {
        self.with_raw_response(nova_envelope(&text))
    }

    pub fn with_raw_response(self, body: serde_json::Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Body(body.to_string().into_bytes()));
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Failure(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Model id and decoded JSON body of every call, in order.
    pub fn get_requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockInferenceClient {
    fn default() -> Self {
        Self::new()
    }
}

fn nova_envelope(text: &str) -> serde_json::Value {
    serde_json::json!({
        "output": {
            "message": {
                "role": "assistant",
                "content": [{ "text": text }]
            }
        },
        "stopReason": "end_turn"
    })
}

#[async_trait]
impl InferenceService for MockInferenceClient {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };

        let decoded = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        self.requests
            .lock()
            .unwrap()
            .push((model_id.to_string(), decoded));

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(nova_envelope(&format!("Mock response {}", count))
                .to_string()
                .into_bytes());
        }

        match &replies[(count - 1) % replies.len()] {
            MockReply::Body(body) => Ok(body.clone()),
            MockReply::Failure(message) => Err(Error::Inference(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_reply() {
        let client = MockInferenceClient::new();

        let body = client.invoke_model("m", b"{}".to_vec()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            value["output"]["message"]["content"][0]["text"],
            "Mock response 1"
        );
    }

    #[tokio::test]
    async fn test_mock_replies_in_order_and_cycle() {
        let client = MockInferenceClient::new()
            .with_text_response("first".to_string())
            .with_failure("boom".to_string());

        assert!(client.invoke_model("m", b"{}".to_vec()).await.is_ok());
        assert!(client.invoke_model("m", b"{}".to_vec()).await.is_err());
        assert!(client.invoke_model("m", b"{}".to_vec()).await.is_ok());
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let client = MockInferenceClient::new();

        client
            .invoke_model("vision", br#"{"a": 1}"#.to_vec())
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "vision");
        assert_eq!(requests[0].1["a"], 1);
    }
}
