//! Text-to-speech abstraction layer for TextVox
//!
//! This crate provides the foundational types and traits for driving a
//! remote neural TTS backend: the voice configuration shared by a batch
//! run, the fixed voice catalog, and the synthesis client trait that
//! backend adapters implement.

pub mod client;
pub mod error;
pub mod types;
pub mod voices;

pub use client::SynthesisClient;
pub use error::{TtsError, TtsResult};
pub use types::{VoiceConfig, VoiceInfo};
