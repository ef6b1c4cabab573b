use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::{AppError, Result};

/// Key-addressed blob store. The S3 client is the production implementation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `data` under `bucket`/`key`, replacing any existing object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}

/// Builds an S3 client from the standard AWS provider chain, optionally
/// pointed at an S3-compatible endpoint.
pub async fn build_s3_client(endpoint_url: Option<&str>) -> aws_sdk_s3::Client {
    let sdk_config = aws_config::load_from_env().await;
    let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);

    if let Some(endpoint) = endpoint_url {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    aws_sdk_s3::Client::from_conf(builder.build())
}

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(aws_sdk_s3::error::DisplayErrorContext(e).to_string()))?;

        tracing::debug!("Stored s3://{}/{}", bucket, key);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct StoredObject {
        pub data: Vec<u8>,
        pub content_type: String,
    }

    /// Keeps objects in memory, keyed by `(bucket, key)`.
    #[derive(Default)]
    pub struct MemoryObjectStore {
        objects: Mutex<HashMap<(String, String), StoredObject>>,
        puts: Mutex<Vec<(String, String)>>,
    }

    impl MemoryObjectStore {
        pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
            self.objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), key.to_string()))
                .cloned()
        }

        pub fn len(&self) -> usize {
            self.objects.lock().unwrap().len()
        }

        /// Every put in call order, including overwrites.
        pub fn puts(&self) -> Vec<(String, String)> {
            self.puts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ObjectStore for MemoryObjectStore {
        async fn put_object(
            &self,
            bucket: &str,
            key: &str,
            data: Vec<u8>,
            content_type: &str,
        ) -> Result<()> {
            let id = (bucket.to_string(), key.to_string());
            self.puts.lock().unwrap().push(id.clone());
            self.objects.lock().unwrap().insert(
                id,
                StoredObject {
                    data,
                    content_type: content_type.to_string(),
                },
            );
            Ok(())
        }
    }

    /// Rejects every write, like a bucket the caller cannot reach.
    pub struct FailingObjectStore;

    #[async_trait]
    impl ObjectStore for FailingObjectStore {
        async fn put_object(&self, bucket: &str, _: &str, _: Vec<u8>, _: &str) -> Result<()> {
            Err(AppError::Storage(format!(
                "NoSuchBucket: The specified bucket {} does not exist",
                bucket
            )))
        }
    }

    #[tokio::test]
    async fn test_memory_store_overwrites_same_key() {
        let store = MemoryObjectStore::default();
        store
            .put_object("b", "k", b"one".to_vec(), "text/plain")
            .await
            .unwrap();
        store
            .put_object("b", "k", b"two".to_vec(), "text/plain")
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.puts().len(), 2);
        assert_eq!(store.get("b", "k").unwrap().data, b"two".to_vec());
    }
}
