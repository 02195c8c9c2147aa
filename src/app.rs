use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::settings::AppConfig;
use crate::infrastructure::qiniu::auth::Credentials;
use crate::infrastructure::qiniu::client::QiniuClient;
use crate::infrastructure::qiniu::region::Region;
use crate::infrastructure::storage::s3::StorageService;
use crate::modules::transcode::reconciler::Reconciler;
use crate::modules::transcode::service::{SubmitOptions, TranscodeService};
use crate::modules::transcode::store::JobStore;
use crate::state::AppState;

/// Wires the Qiniu client, Kodo storage and the job store into the app state.
pub fn build_state(config: AppConfig) -> Result<AppState> {
    let region = Region::from_id(&config.kodo_bucket_region)
        .context("KODO_BUCKET_REGION is not a known Qiniu region")?;
    info!("Using Qiniu region {} ({})", region.id, region.s3_region);

    let api_host = config
        .qiniu_api_host
        .clone()
        .unwrap_or_else(|| region.api_host.to_string());
    let engine = QiniuClient::new(
        Credentials::new(&config.kodo_access_key, &config.kodo_secret_key),
        api_host,
        config.http_timeout(),
    )
    .context("Failed to build Qiniu client")?;

    let s3_endpoint = config
        .kodo_s3_endpoint
        .clone()
        .unwrap_or_else(|| region.s3_endpoint());
    let storage = StorageService::new(
        &s3_endpoint,
        region.s3_region,
        &config.kodo_access_key,
        &config.kodo_secret_key,
    );

    let reconciler = Reconciler::new(JobStore::new(), Arc::new(storage), &config.kodo_bucket);
    let options = SubmitOptions {
        notify_url: config.callback_url.clone(),
        pipeline: config.pipeline.clone(),
    };
    if options.notify_url.is_none() {
        info!("TRANSCODE_CALLBACK_URL not set, jobs are tracked by polling only");
    }

    let transcode = TranscodeService::new(Arc::new(engine), reconciler, options);

    Ok(AppState::new(config, transcode))
}

pub fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
