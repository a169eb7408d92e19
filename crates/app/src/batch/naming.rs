//! Deterministic output naming with collision resolution
//!
//! Output names are `{stem}_{voice short label}.mp3`. A name that is
//! already on disk, or already claimed by an earlier job in the same
//! run, gets a zero-padded numeric suffix. The search is bounded: past
//! 100 attempts the last candidate is returned with the exhaustion
//! flag set, so resolution always terminates.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use textvox_tts::voices;

/// Output audio extension; the backend emits MP3 frames.
pub const AUDIO_EXT: &str = "mp3";

/// Collision suffix attempts before giving up.
pub const MAX_COLLISION_ATTEMPTS: u32 = 100;

/// A resolved output path. `exhausted` marks the degraded case where
/// the collision cap was reached and the last candidate was kept.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub path: PathBuf,
    pub exhausted: bool,
}

/// Resolve an output path for `input_stem` under `output_dir`.
///
/// Pure over the disk snapshot and the `reserved` set; the caller must
/// insert the returned path into `reserved` before resolving the next
/// job of the run.
pub fn resolve(
    input_stem: &str,
    voice_id: &str,
    output_dir: &Path,
    reserved: &HashSet<PathBuf>,
) -> Resolution {
    let short = voices::short_name(voice_id);
    let mut candidate = output_dir.join(format!("{input_stem}_{short}.{AUDIO_EXT}"));

    let mut counter = 0u32;
    while candidate.exists() || reserved.contains(&candidate) {
        counter += 1;
        if counter > MAX_COLLISION_ATTEMPTS {
            return Resolution {
                path: candidate,
                exhausted: true,
            };
        }
        candidate = output_dir.join(format!("{input_stem}_{short}_{counter:03}.{AUDIO_EXT}"));
    }

    Resolution {
        path: candidate,
        exhausted: false,
    }
}
