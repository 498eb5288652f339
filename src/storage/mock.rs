use super::ObjectStore;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockObjectStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    read_count: Arc<Mutex<usize>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            read_count: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_object(self, key: String, content: Vec<u8>) -> Self {
        self.objects.lock().unwrap().insert(key, content);
        self
    }

    /// Make every read fail with a storage error carrying `message`.
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_read_count(&self) -> usize {
        *self.read_count.lock().unwrap()
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        *self.read_count.lock().unwrap() += 1;

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Storage(message));
        }

        let objects = self.objects.lock().unwrap();
        match objects.get(key) {
            Some(data) => Ok(data.clone()),
            None => Err(Error::ObjectNotFound(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_returns_object() {
        let store = MockObjectStore::new().with_object("image.jpg".to_string(), vec![1, 2, 3]);

        let data = store.get_object("image.jpg").await.unwrap();
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(store.get_read_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_store_missing_object() {
        let store = MockObjectStore::new();
        let err = store.get_object("missing.jpg").await.unwrap_err();

        assert!(matches!(err, Error::ObjectNotFound(_)));
        assert!(err.to_string().contains("missing.jpg"));
    }

    #[tokio::test]
    async fn test_mock_store_with_failure() {
        let store = MockObjectStore::new()
            .with_object("image.jpg".to_string(), vec![1])
            .with_failure("Access Denied".to_string());

        let err = store.get_object("image.jpg").await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("Access Denied"));
    }
}
