//! Edge neural speech adapter for TextVox
//!
//! Implements [`SynthesisClient`] over the remote synthesis endpoint:
//! one HTTP POST per request carrying the text and voice parameters,
//! returning the encoded audio bytes as an opaque body. The wire
//! protocol lives entirely in this crate; the pipeline only sees the
//! trait.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use textvox_tts::{SynthesisClient, TtsError, TtsResult, VoiceConfig};
use tracing::{debug, warn};


/// Request body the synthesis endpoint accepts.
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    voice: &'a str,
    rate: &'a str,
    volume: &'a str,
}

/// HTTP client for the remote Edge-style neural TTS service.
pub struct EdgeSpeechClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl EdgeSpeechClient {
    /// Build a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> TtsResult<Self> {
        if endpoint.is_empty() {
            return Err(TtsError::Configuration(
                "synthesis endpoint must not be empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TtsError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            timeout,
        })
    }

    /// Configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SynthesisClient for EdgeSpeechClient {
    fn name(&self) -> &str {
        "edge-speech"
    }

    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> TtsResult<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(TtsError::InvalidInput("empty text input".to_string()));
        }

        let request = SynthesisRequest {
            text,
            voice: &voice.voice_id,
            rate: &voice.rate,
            volume: &voice.volume,
        };
        debug!(
            target: "tts",
            voice = %voice.voice_id,
            chars = text.chars().count(),
            "sending synthesis request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Synthesis(format!(
                        "synthesis request timed out after {:?}",
                        self.timeout
                    ))
                } else {
                    TtsError::Synthesis(format!("synthesis request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(target: "tts", %status, "backend rejected synthesis request");
            return Err(TtsError::Synthesis(format!(
                "backend returned {status}: {}",
                detail.chars().take(200).collect::<String>()
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TtsError::Synthesis(format!("failed to read audio body: {e}")))?;
        debug!(target: "tts", bytes = audio.len(), "synthesis response received");
        Ok(audio.to_vec())
    }
}
