use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use textvox_app::batch::{BatchConfig, BatchConverter, CancelFlag, TracingProgress};
use textvox_tts::{voices, SynthesisClient, TtsError, VoiceConfig};
use textvox_tts_edge::EdgeSpeechClient;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[derive(Parser)]
#[command(name = "textvox", about = "Batch text-to-speech conversion", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert text files to audio, one output file per input
    Convert {
        /// Input text files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output directory, created if absent
        #[arg(long, default_value = "audio_output")]
        out_dir: PathBuf,
        /// Voice: catalog display name or raw backend identifier
        #[arg(long, default_value = voices::DEFAULT_VOICE_ID)]
        voice: String,
        /// Speaking rate adjustment, e.g. "+10%"
        #[arg(long, default_value = "+0%")]
        rate: String,
        /// Volume adjustment, e.g. "-20%"
        #[arg(long, default_value = "+0%")]
        volume: String,
        /// Synthesis service endpoint
        #[arg(long, env = "TEXTVOX_ENDPOINT")]
        endpoint: String,
        /// Per-request synthesis timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
        /// Pause between jobs in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
    },
    /// List the voice catalog
    Voices,
    /// Synthesize a short sample to preview a voice
    Say {
        /// Voice: catalog display name or raw backend identifier
        #[arg(long, default_value = voices::DEFAULT_VOICE_ID)]
        voice: String,
        /// Text to speak; defaults to a per-language sample sentence
        #[arg(long)]
        text: Option<String>,
        /// Output file
        #[arg(long, default_value = "voice_test.mp3")]
        out: PathBuf,
        #[arg(long, default_value = "+0%")]
        rate: String,
        #[arg(long, default_value = "+0%")]
        volume: String,
        #[arg(long, env = "TEXTVOX_ENDPOINT")]
        endpoint: String,
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "textvox.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(guard);
    Ok(())
}

/// Accept a catalog display name or pass a raw identifier through.
/// Identifiers outside the catalog still work via the structural
/// short-name path; only values with no recognizable structure at all
/// are rejected.
fn resolve_voice_id(voice: &str) -> Result<String, TtsError> {
    if let Some(info) = voices::find(voice) {
        return Ok(info.id);
    }
    if voices::short_name(voice) == "Unknown" {
        return Err(TtsError::VoiceNotFound(voice.to_string()));
    }
    Ok(voice.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging().map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    match cli.command {
        Command::Convert {
            inputs,
            out_dir,
            voice,
            rate,
            volume,
            endpoint,
            timeout_secs,
            delay_ms,
        } => {
            let voice_id = resolve_voice_id(&voice)?;
            let voice_config = VoiceConfig::new(&voice_id, &rate, &volume)?;
            let client = EdgeSpeechClient::new(&endpoint, Duration::from_secs(timeout_secs))?;
            let config = BatchConfig {
                output_dir: out_dir,
                inter_job_delay: Duration::from_millis(delay_ms),
            };
            let converter = BatchConverter::new(client, config, Arc::new(TracingProgress));
            let jobs = converter.build_jobs(&inputs, &voice_config);

            let cancel = CancelFlag::new();
            let ctrlc_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!(target: "batch", "cancellation requested, finishing current job");
                    ctrlc_cancel.cancel();
                }
            });

            // The batch runs on its own task; synthesis calls are
            // awaited there one at a time.
            let batch = tokio::spawn(async move { converter.run(jobs, &cancel).await });
            let result = batch.await.context("batch task panicked")??;

            println!(
                "Converted {} of {} file(s), {} failed{}",
                result.succeeded,
                result.total,
                result.failed,
                if result.is_complete() { "" } else { " (cancelled)" },
            );
            if result.failed > 0 {
                std::process::exit(1);
            }
        }
        Command::Voices => {
            for voice in voices::all() {
                println!("{:<24} {:<10} {}", voice.id, voice.short_name, voice.display_name);
            }
        }
        Command::Say {
            voice,
            text,
            out,
            rate,
            volume,
            endpoint,
            timeout_secs,
        } => {
            let voice_id = resolve_voice_id(&voice)?;
            let voice_config = VoiceConfig::new(&voice_id, &rate, &volume)?;
            let client = EdgeSpeechClient::new(&endpoint, Duration::from_secs(timeout_secs))?;
            let sample = text.unwrap_or_else(|| voices::sample_text(&voice_id).to_string());

            let audio = client.synthesize(&sample, &voice_config).await?;
            tokio::fs::write(&out, &audio)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Wrote {} ({} bytes)", out.display(), audio.len());
        }
    }

    Ok(())
}
