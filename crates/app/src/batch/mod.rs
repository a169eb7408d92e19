//! Batch conversion pipeline
//!
//! The orchestration core: job construction with collision-free
//! naming, the per-job read/synthesize/write/verify state machine,
//! progress reporting and the final tally.

pub mod converter;
pub mod loader;
pub mod naming;
pub mod progress;
pub mod types;

pub use converter::{BatchConfig, BatchConverter};
pub use progress::{NullProgress, ProgressSink, TracingProgress};
pub use types::{
    BatchError, BatchResult, CancelFlag, ConversionOutcome, FileJob, JobFailure, JobStatus,
};
