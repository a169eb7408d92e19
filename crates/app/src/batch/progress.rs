//! Progress and observability sink
//!
//! The converter reports through an injected sink rather than shared
//! globals; the CLI installs a tracing-backed one and tests install
//! recording sinks.

use crate::batch::types::{BatchResult, ConversionOutcome, JobStatus};
use tracing::{info, warn};

/// Consumer-facing sink for batch events. All methods default to
/// no-ops so callers implement only what they need.
pub trait ProgressSink: Send + Sync {
    /// Called after every attempted job, in input order.
    fn on_progress(&self, _completed: usize, _total: usize, _current_label: &str) {}

    /// Called with each job's terminal outcome.
    fn on_job_outcome(&self, _outcome: &ConversionOutcome) {}

    /// Called once, after the loop exhausts or cancellation stops it.
    fn on_batch_complete(&self, _result: &BatchResult) {}

    /// Degraded-but-continuing events: lossy decode fallback, naming
    /// exhaustion.
    fn on_warning(&self, _message: &str) {}
}

/// Sink for callers that only want the returned `BatchResult`.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {}

/// Sink that forwards everything to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_progress(&self, completed: usize, total: usize, current_label: &str) {
        info!(target: "batch", "[{completed}/{total}] {current_label}");
    }

    fn on_job_outcome(&self, outcome: &ConversionOutcome) {
        match &outcome.status {
            JobStatus::Succeeded => {
                let bytes = outcome.bytes_written.unwrap_or(0);
                info!(
                    target: "batch",
                    "converted {} -> {} ({:.2} MB in {:.1?})",
                    outcome.job.input_name(),
                    outcome.job.output_path.display(),
                    bytes as f64 / (1024.0 * 1024.0),
                    outcome.elapsed,
                );
            }
            JobStatus::Failed(reason) => {
                warn!(
                    target: "batch",
                    "failed {}: {reason}",
                    outcome.job.input_name(),
                );
            }
        }
    }

    fn on_batch_complete(&self, result: &BatchResult) {
        info!(
            target: "batch",
            "batch complete: {} succeeded, {} failed, {} submitted",
            result.succeeded, result.failed, result.total,
        );
    }

    fn on_warning(&self, message: &str) {
        warn!(target: "batch", "{message}");
    }
}
