use super::dto::{SubmitTranscodeRequest, SubmitTranscodeResponse, TranscodeStatusResponse};
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::infrastructure::qiniu::types::PrefopReport;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

/// Submit a video for transcoding to MP4
#[utoipa::path(
    post,
    path = "/api/v1/transcode",
    request_body = SubmitTranscodeRequest,
    responses(
        (status = 201, description = "Transcoding job submitted", body = ApiResponse<SubmitTranscodeResponse>),
        (status = 400, description = "Invalid source URL"),
        (status = 502, description = "Transcoding engine unavailable")
    ),
    tag = "Transcode"
)]
pub async fn submit_transcode(
    State(state): State<AppState>,
    Json(payload): Json<SubmitTranscodeRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return ApiError(e.to_string(), StatusCode::BAD_REQUEST).into_response();
    }

    match state.transcode.submit(&payload.source_url).await {
        Ok(job) => ApiSuccess(
            ApiResponse::success(
                SubmitTranscodeResponse {
                    task_id: job.job_id,
                    expected_output_url: job.expected_output_url,
                },
                "Transcoding job submitted",
            ),
            StatusCode::CREATED,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Get the status of a transcoding job
#[utoipa::path(
    get,
    path = "/api/v1/transcode/{task_id}",
    params(
        ("task_id" = String, Path, description = "Transcoding job ID")
    ),
    responses(
        (status = 200, description = "Current job status", body = ApiResponse<TranscodeStatusResponse>),
        (status = 502, description = "Transcoding engine unavailable")
    ),
    tag = "Transcode"
)]
pub async fn get_transcode_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    match state.transcode.get_status(&task_id).await {
        Ok(record) => ApiSuccess(
            ApiResponse::success(TranscodeStatusResponse::from(record), "Transcoding status retrieved"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Completion notification from the transcoding engine
#[utoipa::path(
    post,
    path = "/api/v1/transcode/callback",
    request_body = PrefopReport,
    responses(
        (status = 200, description = "Notification applied", body = ApiResponse<TranscodeStatusResponse>),
        (status = 400, description = "Notification without job id")
    ),
    tag = "Transcode"
)]
pub async fn transcode_callback(
    State(state): State<AppState>,
    Json(report): Json<PrefopReport>,
) -> impl IntoResponse {
    match state.transcode.handle_callback(&report).await {
        Ok(record) => ApiSuccess(
            ApiResponse::success(TranscodeStatusResponse::from(record), "Callback received"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::settings::AppConfig;
    use crate::infrastructure::qiniu::types::code;
    use crate::modules::transcode::service::tests::{item, report, service, FakeEngine, FakeStorage};
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn config() -> AppConfig {
        AppConfig {
            server_port: 3000,
            kodo_access_key: "ak".into(),
            kodo_secret_key: "sk".into(),
            kodo_bucket: "bucket".into(),
            kodo_bucket_region: "z0".into(),
            qiniu_api_host: None,
            kodo_s3_endpoint: None,
            callback_url: None,
            pipeline: None,
            http_timeout_secs: 30,
            job_ttl_secs: 3600,
            sweep_interval_secs: 60,
        }
    }

    fn app(engine: Arc<FakeEngine>) -> Router {
        let state = AppState::new(config(), service(engine, Arc::new(FakeStorage::default())));
        crate::modules::transcode::router().with_state(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn submit_returns_task_and_expected_output() {
        let app = app(Arc::new(FakeEngine::new("z0.job-1")));

        let (status, body) = send(&app, post_json("/", json!({"sourceUrl": "kodo://bucket/a.webm"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["taskId"], "z0.job-1");
        assert_eq!(body["data"]["expectedOutputUrl"], "kodo://bucket/a.mp4");
    }

    #[tokio::test]
    async fn submit_rejects_bad_source() {
        let app = app(Arc::new(FakeEngine::new("z0.job-1")));

        let (status, body) = send(&app, post_json("/", json!({"sourceUrl": "not-a-url"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "invalid sourceUrl format");

        let (status, _) = send(&app, post_json("/", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn callback_is_acknowledged_and_visible_in_status() {
        let app = app(Arc::new(FakeEngine::new("z0.job-1")));
        send(&app, post_json("/", json!({"sourceUrl": "kodo://bucket/a.webm"}))).await;

        let failed = report("z0.job-1", code::SUCCESS, "done", vec![item(1, "", "bad codec")]);
        let (status, _) = send(&app, post_json("/callback", serde_json::to_value(&failed).unwrap())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, get("/z0.job-1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "failed");
        assert_eq!(body["data"]["error"], "bad codec");
        assert!(body["data"].get("outputUrl").is_none());
    }

    #[tokio::test]
    async fn status_poll_failure_is_bad_gateway() {
        let app = app(Arc::new(FakeEngine::new("z0.job-1")));

        let (status, body) = send(&app, get("/z0.unknown")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
    }
}
