//! Fixed voice catalog
//!
//! The set of neural voices the tool exposes, with the stable short
//! labels used in output file names. Identifiers outside the catalog
//! still work: the short label is derived structurally from the id so
//! that new backend voices need no code change.

use crate::types::VoiceInfo;
use tracing::warn;

/// Default voice when none is selected.
pub const DEFAULT_VOICE_ID: &str = "zh-CN-XiaoxiaoNeural";

/// (id, display name, short label, language tag)
const CATALOG: &[(&str, &str, &str, &str)] = &[
    // Chinese
    ("zh-CN-XiaoxiaoNeural", "Xiaoxiao (young female, recommended)", "Xiaoxiao", "zh-CN"),
    ("zh-CN-YunxiNeural", "Yunxi (young male)", "Yunxi", "zh-CN"),
    ("zh-CN-YunyangNeural", "Yunyang (news male)", "Yunyang", "zh-CN"),
    ("zh-CN-XiaoxuanNeural", "Xiaoxuan (mature female)", "Xiaoxuan", "zh-CN"),
    ("zh-CN-XiaomengNeural", "Xiaomeng (expressive female)", "Xiaomeng", "zh-CN"),
    ("zh-CN-XiaoruiNeural", "Xiaorui (casual female)", "Xiaorui", "zh-CN"),
    // English
    ("en-US-JennyNeural", "Jenny (US English, female)", "Jenny", "en-US"),
    ("en-US-GuyNeural", "Guy (US English, male)", "Guy", "en-US"),
    ("en-US-AriaNeural", "Aria (US English, female)", "Aria", "en-US"),
    ("en-US-DavisNeural", "Davis (US English, male)", "Davis", "en-US"),
    ("en-US-AmberNeural", "Amber (US English, female)", "Amber", "en-US"),
    ("en-US-AnaNeural", "Ana (US English, child)", "Ana", "en-US"),
    // Japanese
    ("ja-JP-NanamiNeural", "Nanami (Japanese, female)", "Nanami", "ja-JP"),
    ("ja-JP-KeitaNeural", "Keita (Japanese, male)", "Keita", "ja-JP"),
    ("ja-JP-AoiNeural", "Aoi (Japanese, female)", "Aoi", "ja-JP"),
    // Other languages
    ("fr-FR-DeniseNeural", "Denise (French, female)", "Denise", "fr-FR"),
    ("de-DE-KatjaNeural", "Katja (German, female)", "Katja", "de-DE"),
    ("es-ES-ElviraNeural", "Elvira (Spanish, female)", "Elvira", "es-ES"),
    ("ko-KR-SunHiNeural", "SunHi (Korean, female)", "SunHi", "ko-KR"),
    ("ru-RU-SvetlanaNeural", "Svetlana (Russian, female)", "Svetlana", "ru-RU"),
];

/// All catalog entries, in catalog order.
pub fn all() -> Vec<VoiceInfo> {
    CATALOG
        .iter()
        .map(|(id, display, short, lang)| VoiceInfo {
            id: id.to_string(),
            display_name: display.to_string(),
            short_name: short.to_string(),
            language: lang.to_string(),
        })
        .collect()
}

/// Look up a voice by identifier or by display name.
pub fn find(name_or_id: &str) -> Option<VoiceInfo> {
    CATALOG
        .iter()
        .find(|(id, display, _, _)| *id == name_or_id || *display == name_or_id)
        .map(|(id, display, short, lang)| VoiceInfo {
            id: id.to_string(),
            display_name: display.to_string(),
            short_name: short.to_string(),
            language: lang.to_string(),
        })
}

/// Short file-name label for a voice identifier.
///
/// Catalog voices use their fixed label. Unknown identifiers derive
/// one structurally: the last hyphen-delimited segment with a trailing
/// "Neural" suffix stripped, so new backend voices keep producing
/// sensible names. Identifiers with no usable structure become
/// "Unknown".
pub fn short_name(voice_id: &str) -> String {
    if let Some((_, _, short, _)) = CATALOG.iter().find(|(id, _, _, _)| *id == voice_id) {
        return short.to_string();
    }

    if !voice_id.is_empty() && voice_id.contains('-') {
        let parts: Vec<&str> = voice_id.split('-').collect();
        if parts.len() >= 3 {
            let last = parts[parts.len() - 1];
            return last.strip_suffix("Neural").unwrap_or(last).to_string();
        }
        return voice_id.to_string();
    }

    warn!(target: "tts", "voice identifier {voice_id:?} has no recognizable structure, labeling it \"Unknown\"");
    "Unknown".to_string()
}

/// Sample sentence for previewing a voice, chosen by language tag.
pub fn sample_text(voice_id: &str) -> &'static str {
    if voice_id.starts_with("zh-CN") {
        "这是一段测试语音，用于检查当前选择的语音效果。"
    } else if voice_id.starts_with("en-US") {
        "This is a test voice to check the effect of the selected voice."
    } else if voice_id.starts_with("ja-JP") {
        "これはテスト音声です、選択した音声の効果を確認するために。"
    } else {
        "This is a test voice."
    }
}
