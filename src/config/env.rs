use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    KodoAccessKey,
    KodoSecretKey,
    KodoBucket,
    KodoBucketRegion,
    QiniuApiHost,
    KodoS3Endpoint,
    CallbackUrl,
    Pipeline,
    HttpTimeoutSecs,
    JobTtlSecs,
    SweepIntervalSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::KodoAccessKey => "KODO_AK",
            EnvKey::KodoSecretKey => "KODO_SK",
            EnvKey::KodoBucket => "KODO_BUCKET",
            EnvKey::KodoBucketRegion => "KODO_BUCKET_REGION",
            EnvKey::QiniuApiHost => "QINIU_API_HOST",
            EnvKey::KodoS3Endpoint => "KODO_S3_ENDPOINT",
            EnvKey::CallbackUrl => "TRANSCODE_CALLBACK_URL",
            EnvKey::Pipeline => "TRANSCODE_PIPELINE",
            EnvKey::HttpTimeoutSecs => "TRANSCODE_HTTP_TIMEOUT_SECS",
            EnvKey::JobTtlSecs => "TRANSCODE_JOB_TTL_SECS",
            EnvKey::SweepIntervalSecs => "TRANSCODE_SWEEP_INTERVAL_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

/// Unset and blank values both read as `None`.
pub fn get_opt(key: EnvKey) -> Option<String> {
    env::var(key.as_str())
        .ok()
        .filter(|v| !v.trim().is_empty())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
