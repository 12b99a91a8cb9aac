use std::time::Instant;

use tokio::fs;

use crate::{
    config::Config,
    error::Result,
    ffmpeg::{BURN_IN_STYLE, embed_subtitles},
    format::TimestampStyle,
    subtitle::SubtitleDocument,
    transcribe::{self, Transcriber},
    types::{Artifact, OutputKind, Upload},
    workspace::JobWorkspace,
};

/// Upload → transcript → subtitle document → (optional) burned-in video.
///
/// One call is one independent run; nothing is shared between calls apart
/// from the configuration and the transcriber.
pub struct Pipeline {
    config: Config,
    transcriber: Box<dyn Transcriber>,
}

impl Pipeline {
    pub fn from_config(config: Config) -> Self {
        let transcriber = transcribe::from_config(&config);
        Self::with_transcriber(config, transcriber)
    }

    pub fn with_transcriber(config: Config, transcriber: Box<dyn Transcriber>) -> Self {
        Self {
            config,
            transcriber,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transcriber_name(&self) -> &'static str {
        self.transcriber.name()
    }

    /// Generate the requested artifact for `upload`.
    ///
    /// Without an upload this is a no-op: a warning is logged, nothing touches
    /// the filesystem and `Ok(None)` is returned. Otherwise the run's job
    /// workspace is removed before returning, whatever the outcome.
    pub async fn generate(&self, upload: Option<Upload>, kind: OutputKind) -> Result<Option<Artifact>> {
        let Some(upload) = upload else {
            tracing::warn!("No video uploaded, nothing to generate");
            return Ok(None);
        };

        upload.container()?;
        let workspace = JobWorkspace::create(self.config.work_dir.as_deref())?;

        let started = Instant::now();
        let result = self.run(&upload, kind, &workspace).await;

        match &result {
            Ok(artifact) => tracing::info!(
                "Generated {} ({} bytes) from {} in {:.1}s",
                artifact.file_name,
                artifact.bytes.len(),
                upload.file_name,
                started.elapsed().as_secs_f64()
            ),
            Err(e) => tracing::error!(
                kind = %e.kind(),
                "Subtitle generation failed for {}: {}",
                upload.file_name,
                e
            ),
        }

        if let Err(e) = workspace.close() {
            tracing::warn!("Failed to remove job workspace: {}", e);
        }

        result.map(Some)
    }

    async fn run(&self, upload: &Upload, kind: OutputKind, workspace: &JobWorkspace) -> Result<Artifact> {
        let video_path = workspace.stage_upload(upload).await?;
        tracing::info!(
            "Processing {} ({} bytes) as {}",
            upload.file_name,
            upload.bytes.len(),
            kind
        );

        let transcript = self.transcriber.transcribe(&video_path, workspace).await?;
        tracing::info!(
            "Transcribed {} segments, {:.1} min, language {}",
            transcript.segments.len(),
            transcript.duration_seconds() / 60.0,
            transcript.language
        );

        let document = SubtitleDocument::from_segments(&transcript.segments);

        match kind {
            OutputKind::Srt => {
                let srt = document.render(self.config.subtitles.timestamp_style);
                Ok(Artifact::subtitles(srt.into_bytes()))
            }
            OutputKind::EmbeddedVideo => {
                // ffmpeg's SubRip reader needs a fractional part on every
                // timestamp, so the burned copy always uses SubRip timestamps.
                let subtitle_path = workspace.subtitle_path();
                fs::write(&subtitle_path, document.render(TimestampStyle::Srt)).await?;

                let output_path = workspace.output_video_path();
                embed_subtitles(
                    &self.config.ffmpeg.bin,
                    &video_path,
                    &subtitle_path,
                    &output_path,
                    &BURN_IN_STYLE,
                )
                .await?;

                let bytes = fs::read(&output_path).await?;
                Ok(Artifact::subtitled_video(bytes))
            }
        }
    }
}
