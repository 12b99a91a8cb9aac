use std::{fmt, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubgenError {
    #[error("Transcription failed for {video_path}: {reason}")]
    TranscriptionFailed { video_path: PathBuf, reason: String },

    #[error("Audio extraction failed for {video_path}: {reason}")]
    AudioExtractionFailed { video_path: PathBuf, reason: String },

    #[error("Error embedding subtitles: {reason}")]
    EmbeddingFailed { video_path: PathBuf, reason: String },

    #[error("Model download failed for {url}: {reason}")]
    ModelDownloadFailed { url: String, reason: String },

    #[error("Unsupported video file {file_name}: expected one of mp4, avi, mov, mkv")]
    UnsupportedContainer { file_name: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Coarse classification used for logging and HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transcription,
    Embedding,
    InvalidInput,
    Io,
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transcription => "transcription",
            ErrorKind::Embedding => "embedding",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Io => "io",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SubgenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubgenError::TranscriptionFailed { .. }
            | SubgenError::AudioExtractionFailed { .. }
            | SubgenError::ModelDownloadFailed { .. } => ErrorKind::Transcription,
            SubgenError::EmbeddingFailed { .. } => ErrorKind::Embedding,
            SubgenError::UnsupportedContainer { .. } => ErrorKind::InvalidInput,
            SubgenError::IoError(_) => ErrorKind::Io,
            SubgenError::Config(_) | SubgenError::JsonError(_) => ErrorKind::Unexpected,
        }
    }
}

pub type Result<T> = std::result::Result<T, SubgenError>;
