use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::auth::Credentials;
use super::error::{EngineError, EngineResult};
use super::types::{ErrorBody, PfopRequest, PfopResponse, PrefopReport};
use crate::modules::transcode::ports::TranscodeEngine;

const PFOP_PATH: &str = "/pfop/";
const PREFOP_PATH: &str = "/status/get/prefop";

/// HTTP client for Qiniu persistent processing (pfop) and its status query (prefop).
#[derive(Clone)]
pub struct QiniuClient {
    http: Client,
    credentials: Credentials,
    api_host: String,
}

impl QiniuClient {
    pub fn new(
        credentials: Credentials,
        api_host: impl Into<String>,
        timeout: Duration,
    ) -> EngineResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EngineError::Network)?;

        let api_host = api_host.into().trim_end_matches('/').to_string();
        info!("✅ Qiniu client ready ({})", api_host);

        Ok(Self {
            http,
            credentials,
            api_host,
        })
    }

    /// Submits a persistent processing job and returns its `persistentId`.
    pub async fn pfop(&self, request: &PfopRequest) -> EngineResult<String> {
        let body = request.to_form();
        let authorization = self.credentials.qbox_authorization(PFOP_PATH, Some(&body));

        debug!("Submitting pfop for {}/{}: {}", request.bucket, request.key, request.fops);

        let response = self
            .http
            .post(format!("{}{}", self.api_host, PFOP_PATH))
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let submitted: PfopResponse = Self::read_json(response).await?;
        Ok(submitted.persistent_id)
    }

    /// Fetches the current report of a persistent processing job.
    pub async fn prefop(&self, persistent_id: &str) -> EngineResult<PrefopReport> {
        let response = self
            .http
            .get(format!("{}{}", self.api_host, PREFOP_PATH))
            .query(&[("id", persistent_id)])
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> EngineResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(EngineError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| EngineError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TranscodeEngine for QiniuClient {
    async fn submit(&self, request: &PfopRequest) -> EngineResult<String> {
        self.pfop(request).await
    }

    async fn status(&self, job_id: &str) -> EngineResult<PrefopReport> {
        self.prefop(job_id).await
    }
}
