use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

/// Status codes shared by the prefop response and the pfop notification.
pub mod code {
    pub const SUCCESS: i64 = 0;
    pub const QUEUED: i64 = 1;
    pub const PROCESSING: i64 = 2;
    pub const FAILED: i64 = 3;
    pub const CALLBACK_FAILED: i64 = 4;
}

/// Persistent processing submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfopRequest {
    pub bucket: String,
    pub key: String,
    pub fops: String,
    pub notify_url: Option<String>,
    pub pipeline: Option<String>,
    pub force: bool,
}

impl PfopRequest {
    /// Form-encoded body, in the field order the signature is computed over.
    pub fn to_form(&self) -> String {
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("bucket", &self.bucket)
            .append_pair("key", &self.key)
            .append_pair("fops", &self.fops);
        if let Some(notify_url) = &self.notify_url {
            form.append_pair("notifyURL", notify_url);
        }
        if self.force {
            form.append_pair("force", "1");
        }
        if let Some(pipeline) = &self.pipeline {
            form.append_pair("pipeline", pipeline);
        }
        form.finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PfopResponse {
    pub persistent_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Job report, returned by prefop and posted to the notify URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrefopReport {
    #[serde(default)]
    pub id: String,
    pub code: i64,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub pipeline: String,
    #[serde(default)]
    pub reqid: String,
    #[serde(default)]
    pub input_bucket: String,
    #[serde(default)]
    pub input_key: String,
    #[serde(default)]
    pub items: Vec<PrefopItem>,
}

/// Result of one stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrefopItem {
    #[serde(default)]
    pub cmd: String,
    pub code: i64,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub return_old: i64,
}
