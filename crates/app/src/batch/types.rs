//! Value types for the batch pipeline

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use textvox_tts::VoiceConfig;
use thiserror::Error;

/// One unit of work: input file, pre-resolved output path and the
/// voice parameters shared by the run. Created once at batch start and
/// never mutated — the output name is fixed before synthesis begins.
#[derive(Debug, Clone)]
pub struct FileJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub voice: VoiceConfig,
}

impl FileJob {
    /// Input file name for progress labels.
    pub fn input_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input_path.display().to_string())
    }
}

/// Why a job failed, by pipeline stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobFailure {
    #[error("read failed: {0}")]
    Read(String),

    #[error("synthesis failed: {0}")]
    Synthesis(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("empty or missing output")]
    Verification,
}

/// Terminal state of one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Succeeded,
    Failed(JobFailure),
}

/// Result of one attempted job.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub job: FileJob,
    pub status: JobStatus,
    /// Verified output size, present only on success
    pub bytes_written: Option<u64>,
    pub elapsed: Duration,
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, JobStatus::Succeeded)
    }
}

/// Final tally of one batch run. `outcomes` is ordered by input
/// position; it is shorter than `total` only when the run was
/// cancelled between jobs.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<ConversionOutcome>,
}

impl BatchResult {
    pub(crate) fn record(&mut self, outcome: ConversionOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    /// True when every submitted job was attempted.
    pub fn is_complete(&self) -> bool {
        self.outcomes.len() == self.total
    }
}

/// Errors that abort a batch before any job runs. Per-job failures
/// never surface here; they become Failed outcomes instead.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("failed to create output directory {dir}: {source}")]
    OutputDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cooperative cancellation flag, checked between jobs. An in-flight
/// synthesis call is allowed to finish on its own first.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
