//! Text file loading with encoding fallback
//!
//! Input files arrive in whatever encoding the author's editor used.
//! Decoding tries a fixed candidate order and degrades to a lossy
//! single-byte interpretation instead of failing, so malformed input
//! never blocks a batch. Only an unreadable file is a hard error.

use std::io;
use std::path::Path;

use encoding_rs::{Encoding, GB18030, UTF_16LE, UTF_8, WINDOWS_1252};
use tracing::debug;

/// Strict candidates for BOM-less input, tried in order. GB18030 is a
/// superset of the GBK/GB2312 family; UTF-16LE covers little-endian
/// exports that omit the mark.
const STRICT_CANDIDATES: &[&Encoding] = &[UTF_8, GB18030, UTF_16LE];

/// A decoded input file.
#[derive(Debug, Clone)]
pub struct LoadedText {
    pub text: String,
    /// Label of the encoding that produced the text
    pub encoding: &'static str,
    /// True when no strict candidate matched and the single-byte
    /// fallback was used; callers surface this as a warning.
    pub lossy: bool,
}

/// Read and decode a text file.
///
/// Errors only when the file cannot be read at all. Decoding always
/// produces a string: a byte-order mark pins the encoding outright,
/// otherwise the first strict candidate that decodes the bytes without
/// error wins, and failing that every byte is mapped through
/// windows-1252 and the result is flagged lossy.
pub fn load(path: &Path) -> io::Result<LoadedText> {
    let bytes = std::fs::read(path)?;

    // A BOM is authoritative; this also covers big-endian UTF-16,
    // which the candidate walk below would byte-swap.
    if let Some((encoding, _)) = Encoding::for_bom(&bytes) {
        let (text, had_errors) = encoding.decode_with_bom_removal(&bytes);
        debug!(target: "batch", path = %path.display(), encoding = encoding.name(), "decoded BOM-marked input file");
        return Ok(LoadedText {
            text: text.into_owned(),
            encoding: encoding.name(),
            lossy: had_errors,
        });
    }

    for encoding in STRICT_CANDIDATES {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(&bytes) {
            debug!(target: "batch", path = %path.display(), encoding = encoding.name(), "decoded input file");
            return Ok(LoadedText {
                text: text.into_owned(),
                encoding: encoding.name(),
                lossy: false,
            });
        }
    }

    // windows-1252 maps every byte, so this always terminates the
    // search; the caller reports the substitution as a warning.
    let (text, _, _) = WINDOWS_1252.decode(&bytes);
    debug!(target: "batch", path = %path.display(), "no strict encoding matched, using lossy fallback");
    Ok(LoadedText {
        text: text.into_owned(),
        encoding: WINDOWS_1252.name(),
        lossy: true,
    })
}
