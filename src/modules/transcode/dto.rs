use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::model::{JobRecord, JobStatus};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTranscodeRequest {
    /// Source object, e.g. `kodo://bucket/recording.webm`
    #[validate(length(min = 1, message = "sourceUrl is required"))]
    #[serde(default)]
    pub source_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTranscodeResponse {
    pub task_id: String,
    pub expected_output_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscodeStatusResponse {
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<JobRecord> for TranscodeStatusResponse {
    fn from(r: JobRecord) -> Self {
        Self {
            status: r.status,
            output_url: r.output_url,
            error: r.error,
        }
    }
}
