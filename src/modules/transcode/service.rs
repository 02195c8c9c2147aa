use std::sync::Arc;

use tracing::{info, warn};

use super::error::TranscodeError;
use super::model::JobRecord;
use super::ports::TranscodeEngine;
use super::reconciler::{Cleanup, Reconciler};
use super::source::SourceRef;
use super::store::JobStore;
use crate::infrastructure::qiniu::types::{PfopRequest, PrefopReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedJob {
    pub job_id: String,
    pub expected_output_url: String,
}

/// Submission-time settings passed through to the engine.
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Public URL of the callback endpoint; without it jobs are only polled.
    pub notify_url: Option<String>,
    pub pipeline: Option<String>,
}

#[derive(Clone)]
pub struct TranscodeService {
    engine: Arc<dyn TranscodeEngine>,
    reconciler: Reconciler,
    options: SubmitOptions,
}

impl TranscodeService {
    pub fn new(engine: Arc<dyn TranscodeEngine>, reconciler: Reconciler, options: SubmitOptions) -> Self {
        Self {
            engine,
            reconciler,
            options,
        }
    }

    pub fn store(&self) -> &JobStore {
        self.reconciler.store()
    }

    /// Starts converting `source_url` to MP4.
    ///
    /// The job is registered as processing before this returns, so a status
    /// query or callback for the returned id always finds a record.
    pub async fn submit(&self, source_url: &str) -> Result<SubmittedJob, TranscodeError> {
        let source = SourceRef::parse(source_url)?;
        let output_key = source.output_key()?;

        let request = PfopRequest {
            bucket: source.bucket.clone(),
            key: source.key.clone(),
            fops: source.fops(&output_key),
            notify_url: self.options.notify_url.clone(),
            pipeline: self.options.pipeline.clone(),
            force: true,
        };

        let job_id = self.engine.submit(&request).await.map_err(|e| {
            warn!("Failed to submit transcode of {}: {}", source_url, e);
            TranscodeError::from(e)
        })?;

        self.store().insert_processing(&job_id).await;
        info!("🎬 Submitted transcode job {} for {}", job_id, source_url);

        Ok(SubmittedJob {
            job_id,
            expected_output_url: source.url_for(&output_key),
        })
    }

    /// Cached terminal record, or a fresh poll of the engine.
    pub async fn get_status(&self, job_id: &str) -> Result<JobRecord, TranscodeError> {
        if let Some(record) = self.store().get(job_id).await {
            if record.status.is_terminal() {
                return Ok(record);
            }
        }

        let report = self.engine.status(job_id).await.map_err(|e| {
            warn!("Failed to poll transcode job {}: {}", job_id, e);
            TranscodeError::from(e)
        })?;

        Ok(self.reconciler.reconcile(job_id, &report, Cleanup::Keep).await)
    }

    /// Applies an engine notification. A failed job is still a delivered callback.
    pub async fn handle_callback(&self, report: &PrefopReport) -> Result<JobRecord, TranscodeError> {
        if report.id.is_empty() {
            return Err(TranscodeError::invalid("callback is missing the job id"));
        }

        info!("📨 Callback for job {} (code {})", report.id, report.code);
        Ok(self.reconciler.reconcile(&report.id, report, Cleanup::Delete).await)
    }
}
