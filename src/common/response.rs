use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Envelope shared by every JSON endpoint.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            data: None,
        }
    }
}

pub struct ApiSuccess<T>(pub T, pub StatusCode);

impl<T> IntoResponse for ApiSuccess<ApiResponse<T>>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (response, status) = (self.0, self.1);
        (status, Json(response)).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError(pub String, pub StatusCode);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (message, status) = (self.0, self.1);
        let response = ApiResponse::<()>::error(&message);
        (status, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_carries_data() {
        let body = serde_json::to_value(ApiResponse::success(json!({"taskId": "z0.1"}), "ok")).unwrap();
        assert_eq!(body, json!({"status": "success", "message": "ok", "data": {"taskId": "z0.1"}}));
    }

    #[test]
    fn error_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("sourceUrl is required")).unwrap();
        assert_eq!(body, json!({"status": "error", "message": "sourceUrl is required"}));
    }

    #[test]
    fn api_error_uses_given_status() {
        let response = ApiError("engine down".into(), StatusCode::BAD_GATEWAY).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
