//! End-to-end batch pipeline tests with a scripted synthesis client.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;
use textvox_app::batch::{
    BatchConfig, BatchConverter, CancelFlag, JobFailure, JobStatus, ProgressSink,
};
use textvox_tts::{SynthesisClient, TtsError, TtsResult, VoiceConfig};

/// What the scripted client does on the n-th call. The last step
/// repeats once the script is exhausted.
#[derive(Clone)]
enum Step {
    Audio(Vec<u8>),
    Fail(&'static str),
    Empty,
}

struct ScriptedClient {
    script: Vec<Step>,
    calls: Mutex<usize>,
}

impl ScriptedClient {
    fn new(script: Vec<Step>) -> Self {
        Self {
            script,
            calls: Mutex::new(0),
        }
    }

    fn always_ok() -> Self {
        Self::new(vec![Step::Audio(b"mp3-bytes".to_vec())])
    }
}

#[async_trait]
impl SynthesisClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn synthesize(&self, text: &str, _voice: &VoiceConfig) -> TtsResult<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(TtsError::InvalidInput("empty text input".to_string()));
        }
        let index = {
            let mut calls = self.calls.lock();
            let index = *calls;
            *calls += 1;
            index
        };
        let step = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .expect("script must not be empty");
        match step {
            Step::Audio(bytes) => Ok(bytes),
            Step::Fail(message) => Err(TtsError::Synthesis(message.to_string())),
            Step::Empty => Ok(Vec::new()),
        }
    }
}

/// Records events and optionally cancels after N completed jobs.
#[derive(Default)]
struct RecordingSink {
    progress: Mutex<Vec<(usize, usize, String)>>,
    warnings: Mutex<Vec<String>>,
    cancel_after: Option<(usize, CancelFlag)>,
}

impl ProgressSink for RecordingSink {
    fn on_progress(&self, completed: usize, total: usize, current_label: &str) {
        self.progress
            .lock()
            .push((completed, total, current_label.to_string()));
        if let Some((after, flag)) = &self.cancel_after {
            if completed == *after {
                flag.cancel();
            }
        }
    }

    fn on_warning(&self, message: &str) {
        self.warnings.lock().push(message.to_string());
    }
}

struct Fixture {
    _input_dir: TempDir,
    output_dir: TempDir,
    inputs: Vec<PathBuf>,
}

fn fixture(contents: &[&str]) -> Fixture {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let inputs = contents
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let path = input_dir.path().join(format!("file{i}.txt"));
            std::fs::write(&path, text).unwrap();
            path
        })
        .collect();
    Fixture {
        _input_dir: input_dir,
        output_dir,
        inputs,
    }
}

fn converter(
    client: ScriptedClient,
    output_dir: &TempDir,
    sink: Arc<RecordingSink>,
) -> BatchConverter<ScriptedClient> {
    BatchConverter::new(
        client,
        BatchConfig {
            output_dir: output_dir.path().to_path_buf(),
            inter_job_delay: Duration::ZERO,
        },
        sink,
    )
}

#[tokio::test]
async fn all_jobs_succeed_with_ordered_outcomes() {
    let fx = fixture(&["one", "two", "three"]);
    let sink = Arc::new(RecordingSink::default());
    let converter = converter(ScriptedClient::always_ok(), &fx.output_dir, sink.clone());

    let jobs = converter.build_jobs(&fx.inputs, &VoiceConfig::default());
    let result = converter.run(jobs, &CancelFlag::new()).await.unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.succeeded, 3);
    assert_eq!(result.failed, 0);
    assert_eq!(result.succeeded + result.failed, result.outcomes.len());
    assert!(result.is_complete());

    // Outcomes and progress events follow input order
    for (i, outcome) in result.outcomes.iter().enumerate() {
        assert_eq!(outcome.job.input_path, fx.inputs[i]);
        assert!(outcome.is_success());
        assert_eq!(outcome.bytes_written, Some(9));
        assert!(outcome.job.output_path.exists());
    }
    let progress = sink.progress.lock();
    assert_eq!(progress.len(), 3);
    assert_eq!(progress[0], (1, 3, "file0.txt".to_string()));
    assert_eq!(progress[2], (3, 3, "file2.txt".to_string()));
}

#[tokio::test]
async fn failure_mid_batch_does_not_abort() {
    let fx = fixture(&["1", "2", "3", "4", "5"]);
    let ok = || Step::Audio(b"audio".to_vec());
    let client = ScriptedClient::new(vec![ok(), ok(), Step::Fail("backend refused"), ok(), ok()]);
    let sink = Arc::new(RecordingSink::default());
    let converter = converter(client, &fx.output_dir, sink);

    let jobs = converter.build_jobs(&fx.inputs, &VoiceConfig::default());
    let result = converter.run(jobs, &CancelFlag::new()).await.unwrap();

    assert_eq!(result.outcomes.len(), 5);
    assert_eq!(result.succeeded, 4);
    assert_eq!(result.failed, 1);
    match &result.outcomes[2].status {
        JobStatus::Failed(JobFailure::Synthesis(message)) => {
            assert!(message.contains("backend refused"));
        }
        other => panic!("expected synthesis failure on job 3, got {other:?}"),
    }
    assert!(result.outcomes[3].is_success());
    assert!(result.outcomes[4].is_success());
}

#[tokio::test]
async fn cancellation_stops_between_jobs() {
    let fx = fixture(&["1", "2", "3", "4", "5"]);
    let cancel = CancelFlag::new();
    let sink = Arc::new(RecordingSink {
        cancel_after: Some((2, cancel.clone())),
        ..Default::default()
    });
    let converter = converter(ScriptedClient::always_ok(), &fx.output_dir, sink);

    let jobs = converter.build_jobs(&fx.inputs, &VoiceConfig::default());
    let result = converter.run(jobs, &cancel).await.unwrap();

    assert_eq!(result.outcomes.len(), 2);
    assert_eq!(result.total, 5);
    assert!(!result.is_complete());
    assert_eq!(result.succeeded + result.failed, result.outcomes.len());
}

#[tokio::test]
async fn empty_audio_fails_verification() {
    let fx = fixture(&["text"]);
    let client = ScriptedClient::new(vec![Step::Empty]);
    let sink = Arc::new(RecordingSink::default());
    let converter = converter(client, &fx.output_dir, sink);

    let jobs = converter.build_jobs(&fx.inputs, &VoiceConfig::default());
    let result = converter.run(jobs, &CancelFlag::new()).await.unwrap();

    assert_eq!(result.failed, 1);
    assert_eq!(
        result.outcomes[0].status,
        JobStatus::Failed(JobFailure::Verification)
    );
    assert_eq!(result.outcomes[0].bytes_written, None);
}

#[tokio::test]
async fn missing_input_fails_read_and_batch_continues() {
    let fx = fixture(&["real"]);
    let mut inputs = vec![PathBuf::from("/no/such/input.txt")];
    inputs.extend(fx.inputs.iter().cloned());

    let sink = Arc::new(RecordingSink::default());
    let converter = converter(ScriptedClient::always_ok(), &fx.output_dir, sink);
    let jobs = converter.build_jobs(&inputs, &VoiceConfig::default());
    let result = converter.run(jobs, &CancelFlag::new()).await.unwrap();

    assert_eq!(result.outcomes.len(), 2);
    assert!(matches!(
        result.outcomes[0].status,
        JobStatus::Failed(JobFailure::Read(_))
    ));
    assert!(result.outcomes[1].is_success());
}

#[tokio::test]
async fn duplicate_stems_resolve_to_unique_outputs() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let a = dir_a.path().join("a.txt");
    let b = dir_b.path().join("a.txt");
    std::fs::write(&a, b"first").unwrap();
    std::fs::write(&b, b"second").unwrap();

    let sink = Arc::new(RecordingSink::default());
    let converter = converter(ScriptedClient::always_ok(), &output_dir, sink);
    let jobs = converter.build_jobs(&[a, b], &VoiceConfig::default());

    assert_eq!(jobs[0].output_path, output_dir.path().join("a_Xiaoxiao.mp3"));
    assert_eq!(
        jobs[1].output_path,
        output_dir.path().join("a_Xiaoxiao_001.mp3")
    );

    let result = converter.run(jobs, &CancelFlag::new()).await.unwrap();
    assert_eq!(result.succeeded, 2);
    assert!(output_dir.path().join("a_Xiaoxiao.mp3").exists());
    assert!(output_dir.path().join("a_Xiaoxiao_001.mp3").exists());
}

#[tokio::test]
async fn lossy_input_warns_and_still_converts() {
    // Odd length plus bytes no strict encoding accepts
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let input = input_dir.path().join("file0.txt");
    std::fs::write(&input, [b'o', b'k', b'!', 0xFF, 0x80]).unwrap();

    let sink = Arc::new(RecordingSink::default());
    let converter = converter(ScriptedClient::always_ok(), &output_dir, sink.clone());

    let jobs = converter.build_jobs(&[input], &VoiceConfig::default());
    let result = converter.run(jobs, &CancelFlag::new()).await.unwrap();

    assert_eq!(result.succeeded, 1);
    let warnings = sink.warnings.lock();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("file0.txt"));
}

#[tokio::test]
async fn output_directory_is_created_when_absent() {
    let fx = fixture(&["text"]);
    let base = TempDir::new().unwrap();
    let nested = base.path().join("out").join("audio");

    let sink = Arc::new(RecordingSink::default());
    let converter = BatchConverter::new(
        ScriptedClient::always_ok(),
        BatchConfig {
            output_dir: nested.clone(),
            inter_job_delay: Duration::ZERO,
        },
        sink,
    );
    let jobs = converter.build_jobs(&fx.inputs, &VoiceConfig::default());
    let result = converter.run(jobs, &CancelFlag::new()).await.unwrap();

    assert!(nested.is_dir());
    assert_eq!(result.succeeded, 1);
}
