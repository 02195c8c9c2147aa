use anyhow::Result;
use async_trait::async_trait;

use crate::infrastructure::qiniu::error::EngineResult;
use crate::infrastructure::qiniu::types::{PfopRequest, PrefopReport};

/// External engine that runs transcoding jobs.
#[async_trait]
pub trait TranscodeEngine: Send + Sync {
    /// Submits a job and returns the engine-assigned id.
    async fn submit(&self, request: &PfopRequest) -> EngineResult<String>;

    /// Polls the current report of a job.
    async fn status(&self, job_id: &str) -> EngineResult<PrefopReport>;
}

/// Object storage holding transcoding sources.
#[async_trait]
pub trait SourceStore: Send + Sync {
    async fn delete(&self, bucket: &str, key: &str) -> Result<()>;
}
