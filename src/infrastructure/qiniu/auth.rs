use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Access/secret key pair used to sign management requests.
#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// `<AK>:<urlsafe-base64(hmac-sha1(SK, data))>`
    pub fn sign(&self, data: &[u8]) -> String {
        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(data);
        let digest = mac.finalize().into_bytes();

        format!("{}:{}", self.access_key, URL_SAFE.encode(digest))
    }

    /// Builds a `QBox` authorization header value.
    ///
    /// The signed data is the request path (with query, if any), a newline,
    /// and the body when it is form-encoded.
    pub fn qbox_authorization(&self, path_and_query: &str, form_body: Option<&str>) -> String {
        let mut data = String::with_capacity(path_and_query.len() + 1);
        data.push_str(path_and_query);
        data.push('\n');
        if let Some(body) = form_body {
            data.push_str(body);
        }

        format!("QBox {}", self.sign(data.as_bytes()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("test-ak", "test-secret-key")
    }

    #[test]
    fn signs_form_body_after_path() {
        let header = creds().qbox_authorization("/pfop/", Some("bucket=builder&key=a.webm"));
        assert_eq!(header, "QBox test-ak:h52Lu2UR8kCkkHb01DmAxjtmXoA=");
    }

    #[test]
    fn signs_path_with_query_and_no_body() {
        let header = creds().qbox_authorization("/status/get/prefop?id=z0.abc", None);
        assert_eq!(header, "QBox test-ak:RBq5rn5MRWXlpr6mBayNWu3eD58=");
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", creds());
        assert!(rendered.contains("test-ak"));
        assert!(!rendered.contains("test-secret-key"));
    }
}
