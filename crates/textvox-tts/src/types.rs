//! Core types for text-to-speech functionality

use crate::error::{TtsError, TtsResult};
use serde::{Deserialize, Serialize};

/// Voice parameters shared by every job in one batch run.
///
/// Rate and volume are signed percentage strings relative to the
/// backend's baseline ("+0%", "-20%"), matching what the remote
/// service accepts verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Backend voice identifier, e.g. "zh-CN-XiaoxiaoNeural"
    pub voice_id: String,
    /// Speaking rate adjustment, e.g. "+10%"
    pub rate: String,
    /// Volume adjustment, e.g. "-20%"
    pub volume: String,
}

impl VoiceConfig {
    /// Build a config, validating the adjustment strings.
    pub fn new(voice_id: &str, rate: &str, volume: &str) -> TtsResult<Self> {
        if voice_id.is_empty() {
            return Err(TtsError::Configuration("empty voice identifier".to_string()));
        }
        for (label, value) in [("rate", rate), ("volume", volume)] {
            if !is_signed_percentage(value) {
                return Err(TtsError::Configuration(format!(
                    "{} must be a signed percentage like \"+0%\" or \"-20%\", got {:?}",
                    label, value
                )));
            }
        }
        Ok(Self {
            voice_id: voice_id.to_string(),
            rate: rate.to_string(),
            volume: volume.to_string(),
        })
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice_id: crate::voices::DEFAULT_VOICE_ID.to_string(),
            rate: "+0%".to_string(),
            volume: "+0%".to_string(),
        }
    }
}

/// A signed percentage string: sign, at least one digit, percent sign.
fn is_signed_percentage(s: &str) -> bool {
    let rest = match s.strip_prefix(['+', '-']) {
        Some(rest) => rest,
        None => return false,
    };
    let digits = match rest.strip_suffix('%') {
        Some(digits) => digits,
        None => return false,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// One catalog entry describing a backend voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Backend voice identifier
    pub id: String,
    /// Human-readable display name
    pub display_name: String,
    /// Stable short label used in output file names
    pub short_name: String,
    /// Language tag, e.g. "en-US"
    pub language: String,
}
