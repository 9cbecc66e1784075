/// Shared object storage client for the blog backend
///
/// Wraps the AWS S3 SDK behind the small surface the service needs:
/// upload an image, delete an image, and map object keys to public URLs.
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::sync::Arc;

pub mod config;

pub use config::StoreConfig;

/// Errors surfaced by object storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object upload failed: {0}")]
    Upload(String),

    #[error("object delete failed: {0}")]
    Delete(String),

    #[error("object storage unreachable: {0}")]
    Unreachable(String),
}

/// Object storage client wrapper
#[derive(Clone)]
pub struct ObjectStore {
    client: Arc<Client>,
    config: StoreConfig,
}

impl ObjectStore {
    /// Create a new client with configuration from environment
    pub async fn from_env() -> Self {
        Self::with_config(StoreConfig::from_env()).await
    }

    /// Create a new client with custom configuration
    pub async fn with_config(config: StoreConfig) -> Self {
        let aws_config = aws_config::load_from_env().await;
        let client = Client::new(&aws_config);

        Self {
            client: Arc::new(client),
            config,
        }
    }

    /// Get the storage configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Upload an object and return its public URL
    pub async fn upload(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::Upload(e.to_string()))?;

        Ok(self.config.public_url(key))
    }

    /// Delete an object by key
    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::Delete(e.to_string()))?;

        Ok(())
    }

    /// Health check for storage connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        Ok(())
    }
}
