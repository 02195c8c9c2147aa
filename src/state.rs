use crate::config::settings::AppConfig;
use crate::modules::transcode::service::TranscodeService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub transcode: TranscodeService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        transcode: TranscodeService,
    ) -> Self {
        Self {
            config,
            transcode,
        }
    }
}
