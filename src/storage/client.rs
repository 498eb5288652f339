use super::ObjectStore;
use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as S3Client;

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a store using the default AWS credential and region chain.
    pub async fn new(bucket: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::from_client(S3Client::new(&config), bucket)
    }

    pub fn from_client(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        tracing::debug!("Fetching s3://{}/{}", self.bucket, key);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    tracing::error!("Object s3://{}/{} does not exist", self.bucket, key);
                    Error::ObjectNotFound(format!("s3://{}/{}", self.bucket, key))
                } else {
                    tracing::error!("Failed to get object {}: {}", key, DisplayErrorContext(&e));
                    Error::Storage(format!(
                        "Failed to get object {}: {}",
                        key,
                        DisplayErrorContext(&e)
                    ))
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Storage(format!("Failed to read body: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
