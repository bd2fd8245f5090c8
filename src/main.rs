//! Command-line front end for the multi-language recognizer.
//!
//! Reads a raw audio file, races every candidate language against the
//! recognition service, and prints the most confident transcription.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use polyrec::{Language, Recognizer};

/// Multi-language speech recognition for a single audio sample.
#[derive(Parser, Debug)]
#[command(name = "polyrec")]
#[command(version, about = "Recognize speech by racing candidate languages", long_about = None)]
struct Cli {
    /// Audio file to recognize (raw 16-bit linear PCM at 16 kHz)
    audio: PathBuf,

    /// API key for the recognition service
    #[arg(long, short = 'k', env = "GOOGLE_SPEECH_KEY")]
    key: String,

    /// Overall recognition deadline in seconds
    #[arg(long, default_value = "30")]
    deadline: u64,

    /// Recognition service endpoint override
    #[arg(long)]
    endpoint: Option<String>,

    /// Print the winning hypothesis as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if cli.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("🎤 polyrec v{}", env!("CARGO_PKG_VERSION"));
    info!("Candidate languages: {}", Language::ALL.map(|l| l.to_string()).join(", "));

    let audio = std::fs::read(&cli.audio).with_context(|| format!("Failed to read audio file: {}", cli.audio.display()))?;
    if audio.is_empty() {
        anyhow::bail!("Audio file is empty: {}", cli.audio.display());
    }

    let mut recognizer = Recognizer::new(cli.key)?.with_deadline(Duration::from_secs(cli.deadline));
    if let Some(endpoint) = cli.endpoint {
        recognizer = recognizer.with_endpoint(endpoint);
    }

    match recognizer.listen(Bytes::from(audio)).await {
        Ok(hypothesis) => {
            if cli.json {
                println!("{}", serde_json::to_string(&hypothesis)?);
            } else {
                info!("🗣️ {} ({:.0}% confidence)", hypothesis.language, hypothesis.alternative.confidence * 100.0);
                println!("{}", hypothesis.alternative.transcript);
            }
            Ok(())
        }
        Err(err) => {
            error!("❌ {}", err);
            std::process::exit(1);
        }
    }
}
