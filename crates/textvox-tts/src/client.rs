//! Synthesis client abstraction
//!
//! Backend adapters (the Edge adapter, test doubles) implement this
//! trait; the batch pipeline never sees the wire protocol behind it.

use crate::error::TtsResult;
use crate::types::VoiceConfig;
use async_trait::async_trait;

/// Interface to a remote neural TTS backend.
///
/// One call synthesizes one text body to encoded audio bytes. The
/// format of the returned bytes is whatever the backend emits and is
/// opaque to callers. Calls are network-bound and may take seconds;
/// implementations are expected to bound them with a timeout and
/// report a timeout as an ordinary synthesis failure.
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    /// Adapter name for logging
    fn name(&self) -> &str;

    /// Synthesize `text` with the given voice parameters.
    ///
    /// `text` must be nonempty; arbitrarily long text is forwarded
    /// as-is — chunking is the backend's concern, not the caller's.
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> TtsResult<Vec<u8>>;
}
