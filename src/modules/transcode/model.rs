use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Terminal records are never rewritten.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of one transcoding job.
///
/// `output_url` is only set for `Completed`, `error` only for `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub job_id: String,
    pub status: JobStatus,
    pub output_url: Option<String>,
    pub error: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl JobRecord {
    pub fn processing(job_id: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            job_id: job_id.into(),
            status: JobStatus::Processing,
            output_url: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn completed(job_id: impl Into<String>, output_url: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Completed,
            output_url: Some(output_url.into()),
            ..Self::processing(job_id)
        }
    }

    pub fn failed(job_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            error: Some(error.into()),
            ..Self::processing(job_id)
        }
    }

    /// Same outcome, ignoring timestamps.
    pub fn same_outcome(&self, other: &JobRecord) -> bool {
        self.job_id == other.job_id
            && self.status == other.status
            && self.output_url == other.output_url
            && self.error == other.error
    }
}
