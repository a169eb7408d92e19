//! Error types for TTS functionality

use thiserror::Error;

/// TTS error types
#[derive(Error, Debug)]
pub enum TtsError {
    /// Configuration error (bad rate/volume string, bad endpoint)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Voice not found in the catalog and not resolvable
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// Invalid text input
    #[error("Invalid text input: {0}")]
    InvalidInput(String),

    /// Synthesis failed (transport, authentication, backend rejection
    /// or timeout — the pipeline treats all of these the same way)
    #[error("Synthesis failed: {0}")]
    Synthesis(String),
}

/// Result type for TTS operations
pub type TtsResult<T> = Result<T, TtsError>;
