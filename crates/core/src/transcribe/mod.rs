//! Speech-to-text adapters.
//!
//! The transcriber is an opaque external dependency: it takes the path of a
//! staged video and returns timed segments.

mod cli;
mod native;

use std::path::Path;

use async_trait::async_trait;

use crate::{
    config::Config, engine::Engine, error::Result, types::Transcript, workspace::JobWorkspace,
};

pub use cli::WhisperCliTranscriber;
pub use native::{WhisperRsTranscriber, ensure_model};

#[async_trait]
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &'static str;

    /// Transcribe `video_path`. Intermediate files go into `workspace`.
    async fn transcribe(&self, video_path: &Path, workspace: &JobWorkspace) -> Result<Transcript>;
}

/// Build the transcriber selected in `config`.
pub fn from_config(config: &Config) -> Box<dyn Transcriber> {
    match config.transcription.engine {
        Engine::WhisperRs => Box::new(WhisperRsTranscriber::new(
            config.transcription.model.clone(),
            config.transcription.resolved_model_dir(),
            config.transcription.use_gpu,
            config.ffmpeg.bin.clone(),
        )),
        Engine::WhisperCli => Box::new(WhisperCliTranscriber::new(
            config.transcription.whisper_bin.clone(),
            config.transcription.model.clone(),
        )),
    }
}
