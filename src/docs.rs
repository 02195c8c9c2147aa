use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::transcode::handler::submit_transcode,
        crate::modules::transcode::handler::get_transcode_status,
        crate::modules::transcode::handler::transcode_callback,
    ),
    components(
        schemas(
            crate::modules::transcode::dto::SubmitTranscodeRequest,
            crate::modules::transcode::dto::SubmitTranscodeResponse,
            crate::modules::transcode::dto::TranscodeStatusResponse,
            crate::modules::transcode::model::JobStatus,
            crate::infrastructure::qiniu::types::PrefopReport,
            crate::infrastructure::qiniu::types::PrefopItem,
        )
    ),
    tags(
        (name = "Transcode", description = "Video transcoding jobs")
    )
)]
pub struct ApiDoc;
