use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;

use subgen_core::{Config, Engine, OutputKind, Pipeline, SubgenError, Upload};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let whole = d.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    }
}

/// CLI wrapper for OutputKind (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliOutput {
    /// Subtitle document
    #[default]
    Srt,
    /// Video with the subtitles burned in
    Video,
}

impl From<CliOutput> for OutputKind {
    fn from(cli: CliOutput) -> Self {
        match cli {
            CliOutput::Srt => OutputKind::Srt,
            CliOutput::Video => OutputKind::EmbeddedVideo,
        }
    }
}

/// CLI wrapper for Engine
#[derive(Clone, Copy, ValueEnum)]
enum CliEngine {
    WhisperRs,
    WhisperCli,
}

impl From<CliEngine> for Engine {
    fn from(cli: CliEngine) -> Self {
        match cli {
            CliEngine::WhisperRs => Engine::WhisperRs,
            CliEngine::WhisperCli => Engine::WhisperCli,
        }
    }
}

#[derive(Parser)]
#[command(name = "subgen")]
#[command(
    about = "Transcribe a video with Whisper and write subtitles, or a copy of the video with the subtitles burned in"
)]
struct Cli {
    /// Video file (mp4, avi, mov or mkv)
    video: PathBuf,

    /// Output preference
    #[arg(short, long, value_enum, default_value = "srt")]
    output: CliOutput,

    /// Where to write the result. Defaults to subtitles.srt or
    /// video_with_subtitles.mp4 in the current directory
    #[arg(long)]
    out: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = "subgen.toml")]
    config: PathBuf,

    /// Transcription engine, overriding the configuration file
    #[arg(short, long, value_enum)]
    engine: Option<CliEngine>,

    /// Whisper model, overriding the configuration file (e.g. "base", "large-v3")
    #[arg(short, long)]
    model: Option<String>,
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    if let Some(engine) = cli.engine {
        config.transcription.engine = engine.into();
    }
    if let Some(model) = cli.model {
        config.transcription.model = model;
    }
    let kind: OutputKind = cli.output.into();

    let file_name = cli
        .video
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = fs::read(&cli.video)
        .await
        .with_context(|| format!("failed to read {}", cli.video.display()))?;
    let upload = Upload::new(file_name, bytes);

    // Reject unsupported files before loading anything heavy
    if let Err(e) = upload.container() {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    let pipeline = Pipeline::from_config(config);

    println!(
        "\n{}  {}\n",
        style("subgen").cyan().bold(),
        style("Auto Subtitle Generator").dim()
    );
    println!(
        "{} {} {}",
        style("✓").green().bold(),
        style(cli.video.display()).dim(),
        style(format!("→ {}", kind.label())).dim()
    );
    println!("{}", style("─".repeat(60)).dim());

    let started = Instant::now();
    let spinner = create_spinner(&format!(
        "Processing video with {}... This may take a few minutes.",
        pipeline.transcriber_name()
    ))?;

    let artifact = match pipeline.generate(Some(upload), kind).await {
        Ok(Some(artifact)) => artifact,
        Ok(None) => anyhow::bail!("nothing was generated for {}", cli.video.display()),
        Err(e) => {
            spinner.finish_and_clear();
            match &e {
                SubgenError::EmbeddingFailed { reason, .. } => {
                    eprintln!("{} Error embedding subtitles:", style("✗").red().bold());
                    eprintln!("{}", reason);
                }
                other => eprintln!("{} {}", style("✗").red().bold(), other),
            }
            std::process::exit(1);
        }
    };

    let out = cli.out.unwrap_or_else(|| PathBuf::from(artifact.file_name));
    fs::write(&out, &artifact.bytes)
        .await
        .with_context(|| format!("failed to write {}", out.display()))?;

    spinner.finish_with_message(format!(
        "{} Generated {} {}",
        style("✓").green().bold(),
        artifact.file_name,
        style(format!("[{}]", format_duration(started.elapsed()))).dim()
    ));

    println!(
        "\n{} {}\n",
        style("Saved:").dim(),
        style(out.display()).cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_millis(119_600)), "1m 59s");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["subgen", "clip.mkv", "-o", "video", "-e", "whisper-cli"])
            .unwrap();
        assert_eq!(OutputKind::from(cli.output), OutputKind::EmbeddedVideo);
        assert_eq!(Engine::from(cli.engine.unwrap()), Engine::WhisperCli);
        assert_eq!(cli.config, PathBuf::from("subgen.toml"));
        assert!(cli.out.is_none());
    }
}
