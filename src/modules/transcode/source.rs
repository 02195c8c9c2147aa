use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use url::Url;

use super::error::TranscodeError;

pub const SOURCE_SCHEME: &str = "kodo";
pub const SOURCE_EXTENSIONS: &[&str] = &["webm", "mkv", "mov", "avi", "flv", "ogv"];
pub const TARGET_EXTENSION: &str = "mp4";

/// H.264 MP4, the engine's default video codec for this format.
const TARGET_FOP: &str = "avthumb/mp4";

/// Object addressed by a `kodo://bucket/key` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub bucket: String,
    pub key: String,
}

impl SourceRef {
    pub fn parse(raw: &str) -> Result<Self, TranscodeError> {
        if raw.trim().is_empty() {
            return Err(TranscodeError::invalid("sourceUrl is required"));
        }

        let url = Url::parse(raw.trim()).map_err(|_| TranscodeError::invalid("invalid sourceUrl format"))?;
        if url.scheme() != SOURCE_SCHEME {
            return Err(TranscodeError::invalid("sourceUrl must be a kodo:// URL"));
        }

        let bucket = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| TranscodeError::invalid("sourceUrl must name a bucket"))?
            .to_string();

        let key = urlencoding::decode(url.path().trim_start_matches('/'))
            .map_err(|_| TranscodeError::invalid("invalid sourceUrl format"))?
            .into_owned();
        if key.is_empty() {
            return Err(TranscodeError::invalid("sourceUrl must name an object key"));
        }

        Ok(Self { bucket, key })
    }

    /// Key the transcoded file is saved under: the source extension swapped for `.mp4`.
    pub fn output_key(&self) -> Result<String, TranscodeError> {
        let unsupported = || {
            TranscodeError::invalid(format!(
                "unsupported source format, expected one of: {}",
                SOURCE_EXTENSIONS.join(", ")
            ))
        };

        let (stem, ext) = self.key.rsplit_once('.').ok_or_else(unsupported)?;
        let file_stem = stem.rsplit('/').next().unwrap_or(stem);
        if file_stem.is_empty() || !SOURCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return Err(unsupported());
        }

        Ok(format!("{}.{}", stem, TARGET_EXTENSION))
    }

    /// Pipeline descriptor: convert, then save as `bucket:output_key`.
    pub fn fops(&self, output_key: &str) -> String {
        let save_as = URL_SAFE.encode(format!("{}:{}", self.bucket, output_key));
        format!("{}|saveas/{}", TARGET_FOP, save_as)
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}://{}/{}", SOURCE_SCHEME, self.bucket, key)
    }
}
