//! Blocking HTTP client for GPT-SoVITS-style synthesis endpoints.
//!
//! Calls are sequential by design: the synthesis server processes one
//! request at a time, so there is nothing to gain from pipelining, and
//! a chapter can take minutes to render.

use std::time::Duration;

use log::warn;
use reqwest::blocking::Client;
use serde::Serialize;

use crate::error::{Result, TtsError};

/// Synthesis can run for a long time on large chapters.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(1200);

/// Maximum attempts per request, including the first.
pub const MAX_RETRIES: u32 = 3;

/// Request payload for the `/tts` endpoint.
///
/// Field names follow the GPT-SoVITS API; everything except `text` is
/// normally fixed for a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub text_lang: String,
    pub ref_audio_path: String,
    pub prompt_lang: String,
    pub prompt_text: String,
    pub text_split_method: String,
    pub batch_size: u32,
    pub seed: u64,
    pub media_type: String,
    pub streaming_mode: bool,
}

impl SynthesisRequest {
    /// Build a request with the standard Chinese-novel defaults, leaving
    /// only the text and reference audio to the caller.
    pub fn new(text: impl Into<String>, ref_audio_path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_lang: "zh".to_string(),
            ref_audio_path: ref_audio_path.into(),
            prompt_lang: "zh".to_string(),
            prompt_text: String::new(),
            text_split_method: "cut3".to_string(),
            batch_size: 8,
            seed: 0,
            media_type: "aac".to_string(),
            streaming_mode: true,
        }
    }
}

/// Client bound to a single synthesis endpoint.
pub struct TtsClient {
    endpoint: String,
    client: Client,
}

impl TtsClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Synthesize one text and return the raw audio bytes.
    ///
    /// Retries transport failures and 5xx responses up to [`MAX_RETRIES`]
    /// times with linearly increasing backoff. 4xx responses are treated
    /// as caller errors and returned immediately.
    pub fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>> {
        let mut last_error = String::new();

        for attempt in 1..=MAX_RETRIES {
            match self.synthesize_once(request) {
                Ok(bytes) => return Ok(bytes),
                Err(TtsError::Api { status, message }) => {
                    if status.is_some_and(|s| (400..500).contains(&s)) {
                        return Err(TtsError::Api { status, message });
                    }
                    last_error = message;
                }
                Err(TtsError::Transport(e)) => {
                    last_error = e.to_string();
                }
                Err(other) => return Err(other),
            }

            if attempt < MAX_RETRIES {
                let backoff = Duration::from_secs(2 * u64::from(attempt));
                warn!(
                    "attempt {}/{} failed ({}), retrying in {:?}",
                    attempt, MAX_RETRIES, last_error, backoff
                );
                std::thread::sleep(backoff);
            }
        }

        Err(TtsError::RetriesExhausted {
            attempts: MAX_RETRIES,
            last_error,
        })
    }

    fn synthesize_once(&self, request: &SynthesisRequest) -> Result<Vec<u8>> {
        let response = self.client.post(&self.endpoint).json(request).send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(TtsError::Api {
                message,
                status: Some(status.as_u16()),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req = SynthesisRequest::new("你好", "/srv/ref.wav");
        assert_eq!(req.text, "你好");
        assert_eq!(req.text_lang, "zh");
        assert_eq!(req.text_split_method, "cut3");
        assert_eq!(req.media_type, "aac");
        assert!(req.streaming_mode);
    }

    #[test]
    fn test_request_serializes_all_fields() {
        let req = SynthesisRequest::new("text", "ref.wav");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["text"], "text");
        assert_eq!(json["ref_audio_path"], "ref.wav");
        assert_eq!(json["batch_size"], 8);
        assert_eq!(json["seed"], 0);
    }

    #[test]
    fn test_client_stores_endpoint() {
        let client = TtsClient::new("http://127.0.0.1:9880/tts").unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9880/tts");
    }
}
