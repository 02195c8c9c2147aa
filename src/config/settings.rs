use serde::Deserialize;
use std::time::Duration;
use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub kodo_access_key: String,
    pub kodo_secret_key: String,
    pub kodo_bucket: String,
    pub kodo_bucket_region: String,
    pub qiniu_api_host: Option<String>,
    pub kodo_s3_endpoint: Option<String>,
    pub callback_url: Option<String>,
    pub pipeline: Option<String>,
    pub http_timeout_secs: u64,
    pub job_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            kodo_access_key: env::get(EnvKey::KodoAccessKey)?,
            kodo_secret_key: env::get(EnvKey::KodoSecretKey)?,
            kodo_bucket: env::get(EnvKey::KodoBucket)?,
            kodo_bucket_region: env::get(EnvKey::KodoBucketRegion)?,
            qiniu_api_host: env::get_opt(EnvKey::QiniuApiHost),
            kodo_s3_endpoint: env::get_opt(EnvKey::KodoS3Endpoint),
            callback_url: env::get_opt(EnvKey::CallbackUrl),
            pipeline: env::get_opt(EnvKey::Pipeline),
            http_timeout_secs: env::get_parsed(EnvKey::HttpTimeoutSecs, 30),
            job_ttl_secs: env::get_parsed(EnvKey::JobTtlSecs, 24 * 60 * 60),
            sweep_interval_secs: env::get_parsed(EnvKey::SweepIntervalSecs, 300),
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn job_ttl(&self) -> Duration {
        Duration::from_secs(self.job_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
