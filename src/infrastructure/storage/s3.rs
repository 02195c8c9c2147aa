use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_sdk_s3::{Client, config::Region, config::Credentials, config::BehaviorVersion};
use aws_sdk_s3::config::Builder;
use tracing::info;

use crate::modules::transcode::ports::SourceStore;

/// Kodo objects, reached through its S3-compatible endpoint.
#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
}

impl StorageService {
    pub fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str
    ) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .build();

        let client = Client::from_conf(config);

        info!("✅ Kodo S3 client ready ({})", endpoint);

        Self { client }
    }

    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), aws_sdk_s3::Error> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;

        Ok(())
    }
}

#[async_trait]
impl SourceStore for StorageService {
    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.delete_object(bucket, key)
            .await
            .map_err(|e| anyhow!("Failed to delete {}/{}: {}", bucket, key, e))
    }
}
