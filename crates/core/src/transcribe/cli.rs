use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, process::Command};

use crate::{
    engine::Engine,
    error::{Result, SubgenError},
    transcribe::Transcriber,
    types::Transcript,
    workspace::JobWorkspace,
};

/// The `whisper` command-line tool, reading the video directly.
pub struct WhisperCliTranscriber {
    whisper_bin: PathBuf,
    model: String,
}

impl WhisperCliTranscriber {
    pub fn new(whisper_bin: PathBuf, model: String) -> Self {
        Self { whisper_bin, model }
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    fn name(&self) -> &'static str {
        Engine::WhisperCli.name()
    }

    async fn transcribe(&self, video_path: &Path, workspace: &JobWorkspace) -> Result<Transcript> {
        let output_dir = workspace.path();
        let failed = |reason: String| SubgenError::TranscriptionFailed {
            video_path: video_path.to_path_buf(),
            reason,
        };

        tracing::info!("Transcribing with {} ({})", self.name(), self.model);
        let output = Command::new(&self.whisper_bin)
            .arg(video_path)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_format")
            .arg("json")
            .arg("--output_dir")
            .arg(output_dir)
            .arg("--verbose")
            .arg("False")
            .output()
            .await
            .map_err(|e| {
                failed(format!(
                    "failed to run {}: {}",
                    self.whisper_bin.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(failed(String::from_utf8_lossy(&output.stderr).to_string()));
        }

        // Whisper names its output after the input file
        let stem = video_path.file_stem().unwrap_or_default().to_string_lossy();
        let json_path = output_dir.join(format!("{}.json", stem));

        let json_content = fs::read_to_string(&json_path)
            .await
            .map_err(|e| failed(format!("missing output {}: {}", json_path.display(), e)))?;
        serde_json::from_str(&json_content)
            .map_err(|e| failed(format!("unreadable output {}: {}", json_path.display(), e)))
    }
}
