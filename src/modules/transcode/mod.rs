use axum::Router;
use axum::routing::{get, post};
use crate::state::AppState;

pub mod dto;
pub mod error;
pub mod handler;
pub mod model;
pub mod ports;
pub mod reconciler;
pub mod service;
pub mod source;
pub mod store;

// The engine callback is unauthenticated; it only ever moves a job forward.
pub fn router() -> axum::Router<AppState> {
    Router::new()
        .route("/", post(handler::submit_transcode))
        .route("/callback", post(handler::transcode_callback))
        .route("/{task_id}", get(handler::get_transcode_status))
}
