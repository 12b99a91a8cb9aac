//! subgen core library
//!
//! Transcribes an uploaded video with Whisper, formats the segments as a
//! subtitle document, and optionally burns the subtitles into the video
//! with ffmpeg.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod ffmpeg;
pub mod format;
pub mod pipeline;
pub mod subtitle;
pub mod transcribe;
pub mod types;
pub mod workspace;

// Re-export commonly used items at crate root
pub use config::Config;
pub use engine::Engine;
pub use error::{ErrorKind, Result, SubgenError};
pub use format::{TimestampStyle, format_srt_timestamp, format_timestamp};
pub use pipeline::Pipeline;
pub use subtitle::{SubtitleBlock, SubtitleDocument, format_subtitles};
pub use transcribe::Transcriber;
pub use types::{Artifact, OutputKind, SUPPORTED_CONTAINERS, Segment, Transcript, Upload};
pub use workspace::JobWorkspace;
