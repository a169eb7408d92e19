//! Batch converter
//!
//! Drives each job through Reading -> Synthesizing -> Writing ->
//! Verifying, sequentially and in input order on a single task. A
//! failing job becomes a Failed outcome and the loop continues; only a
//! failure to create the output directory aborts the batch before any
//! job runs. Cancellation is checked between jobs.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use textvox_tts::{SynthesisClient, VoiceConfig};
use tracing::{debug, info};

use crate::batch::loader;
use crate::batch::naming;
use crate::batch::progress::ProgressSink;
use crate::batch::types::{
    BatchError, BatchResult, CancelFlag, ConversionOutcome, FileJob, JobFailure, JobStatus,
};

/// Batch-level settings shared by every job of a run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory receiving the audio files, created if absent
    pub output_dir: PathBuf,
    /// Pause between jobs, a rate-limiting courtesy to the backend
    pub inter_job_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("audio_output"),
            inter_job_delay: Duration::from_millis(500),
        }
    }
}

/// The batch orchestrator. Owns the synthesis client and the injected
/// progress sink for one run.
pub struct BatchConverter<C: SynthesisClient> {
    client: C,
    config: BatchConfig,
    progress: Arc<dyn ProgressSink>,
}

impl<C: SynthesisClient> BatchConverter<C> {
    pub fn new(client: C, config: BatchConfig, progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            client,
            config,
            progress,
        }
    }

    /// Build one job per input, resolving every output name up front.
    ///
    /// Names already claimed by earlier jobs of this run count as
    /// collisions, so every job's output path is unique before any
    /// synthesis starts. Naming exhaustion is surfaced as a warning
    /// and the job proceeds with the last candidate.
    pub fn build_jobs(&self, inputs: &[PathBuf], voice: &VoiceConfig) -> Vec<FileJob> {
        let mut reserved: HashSet<PathBuf> = HashSet::new();
        let mut jobs = Vec::with_capacity(inputs.len());

        for input in inputs {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.display().to_string());
            let resolution =
                naming::resolve(&stem, &voice.voice_id, &self.config.output_dir, &reserved);
            if resolution.exhausted {
                self.progress.on_warning(&format!(
                    "collision suffixes exhausted for {}, reusing {}",
                    input.display(),
                    resolution.path.display(),
                ));
            }
            reserved.insert(resolution.path.clone());
            jobs.push(FileJob {
                input_path: input.clone(),
                output_path: resolution.path,
                voice: voice.clone(),
            });
        }

        jobs
    }

    /// Run the batch to completion or cancellation.
    ///
    /// Outcomes are appended strictly in input order. The returned
    /// result is partial only when `cancel` was signalled between
    /// jobs; an in-flight synthesis call always finishes first.
    pub async fn run(
        &self,
        jobs: Vec<FileJob>,
        cancel: &CancelFlag,
    ) -> Result<BatchResult, BatchError> {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|source| BatchError::OutputDir {
                dir: self.config.output_dir.clone(),
                source,
            })?;

        let total = jobs.len();
        info!(
            target: "batch",
            total,
            client = self.client.name(),
            output_dir = %self.config.output_dir.display(),
            "starting batch conversion"
        );

        let mut result = BatchResult {
            total,
            ..Default::default()
        };

        for (index, job) in jobs.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(target: "batch", attempted = index, total, "batch cancelled");
                break;
            }

            let outcome = self.convert_one(job).await;
            self.progress
                .on_progress(index + 1, total, &job.input_name());
            self.progress.on_job_outcome(&outcome);
            result.record(outcome);

            let is_last = index + 1 == total;
            if !is_last && !self.config.inter_job_delay.is_zero() {
                tokio::time::sleep(self.config.inter_job_delay).await;
            }
        }

        self.progress.on_batch_complete(&result);
        Ok(result)
    }

    /// One pass of the per-job state machine. Every error is caught
    /// here and folded into the outcome.
    async fn convert_one(&self, job: &FileJob) -> ConversionOutcome {
        let started = Instant::now();
        let (status, bytes_written) = self.attempt(job).await;
        ConversionOutcome {
            job: job.clone(),
            status,
            bytes_written,
            elapsed: started.elapsed(),
        }
    }

    async fn attempt(&self, job: &FileJob) -> (JobStatus, Option<u64>) {
        // Reading
        debug!(target: "batch", input = %job.input_path.display(), "reading");
        let loaded = match loader::load(&job.input_path) {
            Ok(loaded) => loaded,
            Err(e) => return (JobStatus::Failed(JobFailure::Read(e.to_string())), None),
        };
        if loaded.lossy {
            self.progress.on_warning(&format!(
                "{}: no text encoding matched cleanly, decoded with byte substitution",
                job.input_name(),
            ));
        }

        // Synthesizing
        debug!(
            target: "batch",
            input = %job.input_path.display(),
            chars = loaded.text.chars().count(),
            encoding = loaded.encoding,
            "synthesizing"
        );
        let audio = match self.client.synthesize(&loaded.text, &job.voice).await {
            Ok(audio) => audio,
            Err(e) => {
                return (
                    JobStatus::Failed(JobFailure::Synthesis(e.to_string())),
                    None,
                )
            }
        };

        // Writing
        debug!(target: "batch", output = %job.output_path.display(), "writing");
        if let Err(e) = tokio::fs::write(&job.output_path, &audio).await {
            return (JobStatus::Failed(JobFailure::Write(e.to_string())), None);
        }

        // Verifying
        match self.verified_size(job).await {
            Some(size) => (JobStatus::Succeeded, Some(size)),
            None => (JobStatus::Failed(JobFailure::Verification), None),
        }
    }

    /// Output size, or None when the file is absent or empty.
    async fn verified_size(&self, job: &FileJob) -> Option<u64> {
        match tokio::fs::metadata(&job.output_path).await {
            Ok(meta) if meta.len() > 0 => Some(meta.len()),
            _ => None,
        }
    }
}
