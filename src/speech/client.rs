//! HTTP client for the remote recognition service.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::Error;
use crate::lang::Language;

/// Default recognition endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.google.com/speech-api/v2/recognize";

/// Content type for the raw audio body: 16-bit linear PCM at 16 kHz.
const AUDIO_CONTENT_TYPE: &str = "audio/l16; rate=16000;";

/// The service streams a literal empty-result object ahead of the real
/// payload when the first chunk matched nothing. Must be stripped before
/// the remainder can be decoded as a single JSON object.
const EMPTY_RESULT_PRELUDE: &str = "{\"result\":[]}\n";

/// Client for one request/response exchange with the recognition service.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct SpeechClient {
    http: reqwest::Client, // Shared connection pool
    endpoint: String,      // Recognition service URL
    api_key: String,       // Opaque credential, passed through unmodified
}

impl SpeechClient {
    /// Create a client for the default endpoint.
    ///
    /// # Arguments
    /// * `api_key` - Opaque credential for the recognition service
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, endpoint: DEFAULT_ENDPOINT.to_string(), api_key: api_key.into() })
    }

    /// Override the recognition endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Submit one audio sample for recognition in one language.
    ///
    /// Sends the raw bytes as the POST body and waits for the full response
    /// body. The empty-result prelude, if present, is stripped so the
    /// remainder is ready for parsing.
    ///
    /// # Errors
    /// Any transport failure (connection, timeout, non-2xx status,
    /// undecodable body) is returned as [`Error::Transport`].
    pub async fn recognize(&self, audio: Bytes, language: Language) -> Result<String, Error> {
        let url = format!("{}?lang={}&output=json&key={}", self.endpoint, language.wire_code(), urlencoding::encode(&self.api_key));

        debug!("Submitting {} bytes for {}", audio.len(), language);

        let response = self.http.post(&url).header(CONTENT_TYPE, AUDIO_CONTENT_TYPE).body(audio).send().await?.error_for_status()?;
        let body = response.text().await?;

        Ok(strip_empty_prelude(&body).to_string())
    }
}

/// Remove the service's empty-result prelude line, if present.
///
/// A fixed-string strip, not JSON-stream parsing: the service prefixes
/// exactly `{"result":[]}\n` when it streams two objects back-to-back.
pub(crate) fn strip_empty_prelude(body: &str) -> &str {
    body.strip_prefix(EMPTY_RESULT_PRELUDE).unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_prelude_once() {
        let body = "{\"result\":[]}\n{\"result\":[{\"alternative\":[]}]}";
        assert_eq!(strip_empty_prelude(body), "{\"result\":[{\"alternative\":[]}]}");
    }

    #[test]
    fn leaves_plain_bodies_alone() {
        assert_eq!(strip_empty_prelude("{\"result\":[]}"), "{\"result\":[]}");
        assert_eq!(strip_empty_prelude("not json"), "not json");
    }
}
