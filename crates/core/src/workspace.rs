use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::fs;

use crate::{error::Result, types::Upload};

/// Per-job temporary directory holding every intermediate file of one run.
///
/// The directory and everything in it is removed when the workspace is
/// dropped, on the success path and on every error path alike.
pub struct JobWorkspace {
    dir: TempDir,
}

impl JobWorkspace {
    /// Create a fresh workspace under `root`, or under the system temp dir.
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("subgen-");

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        tracing::debug!("Created job workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn video_path(&self, extension: &str) -> PathBuf {
        self.path().join(format!("input.{}", extension))
    }

    pub fn audio_path(&self) -> PathBuf {
        self.path().join("audio.wav")
    }

    pub fn subtitle_path(&self) -> PathBuf {
        self.path().join("subtitles.srt")
    }

    pub fn output_video_path(&self) -> PathBuf {
        self.path().join("output_with_subtitles.mp4")
    }

    /// Write the uploaded bytes into the workspace, keeping the container
    /// extension so external tools can detect its format.
    pub async fn stage_upload(&self, upload: &Upload) -> Result<PathBuf> {
        let path = self.video_path(&upload.container()?);
        fs::write(&path, &upload.bytes).await?;
        Ok(path)
    }

    /// Remove the workspace now, surfacing any removal error instead of
    /// ignoring it the way drop does.
    pub fn close(self) -> Result<()> {
        self.dir.close()?;
        Ok(())
    }
}
