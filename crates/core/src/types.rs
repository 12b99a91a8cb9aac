use std::{fmt, path::Path, str::FromStr};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SubgenError};

/// Container extensions accepted for upload. Content is never inspected.
pub const SUPPORTED_CONTAINERS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

pub const SUBTITLES_FILE_NAME: &str = "subtitles.srt";
pub const SUBTITLED_VIDEO_FILE_NAME: &str = "video_with_subtitles.mp4";

/// Transcriber output, in the same shape the `whisper` CLI writes as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub text: String,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub language: String,
}

impl Transcript {
    pub fn duration_seconds(&self) -> f64 {
        self.segments.last().map(|s| s.end).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// What the user asked to download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Srt,
    #[serde(rename = "video")]
    EmbeddedVideo,
}

impl OutputKind {
    pub fn label(&self) -> &'static str {
        match self {
            OutputKind::Srt => "Download SRT File",
            OutputKind::EmbeddedVideo => "Video with Embedded Subtitles",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Srt => "srt",
            OutputKind::EmbeddedVideo => "video",
        }
    }

    /// Name the finished artifact is offered under.
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputKind::Srt => SUBTITLES_FILE_NAME,
            OutputKind::EmbeddedVideo => SUBTITLED_VIDEO_FILE_NAME,
        }
    }

    pub fn done_message(&self) -> &'static str {
        match self {
            OutputKind::Srt => "SRT file generated!",
            OutputKind::EmbeddedVideo => "Video with embedded subtitles generated!",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srt" => Ok(OutputKind::Srt),
            "video" => Ok(OutputKind::EmbeddedVideo),
            other => Err(format!("unknown output preference: {other}")),
        }
    }
}

/// An uploaded video, held in memory until it is staged into a job workspace.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Lowercased container extension, if it is one we accept.
    pub fn container(&self) -> Result<String> {
        let ext = Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        match ext {
            Some(ext) if SUPPORTED_CONTAINERS.contains(&ext.as_str()) => Ok(ext),
            _ => Err(SubgenError::UnsupportedContainer {
                file_name: self.file_name.clone(),
            }),
        }
    }
}

/// A finished result, ready to be offered for download.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn subtitles(bytes: Vec<u8>) -> Self {
        Self {
            file_name: SUBTITLES_FILE_NAME,
            mime_type: "text/plain",
            bytes,
        }
    }

    pub fn subtitled_video(bytes: Vec<u8>) -> Self {
        Self {
            file_name: SUBTITLED_VIDEO_FILE_NAME,
            mime_type: "video/mp4",
            bytes,
        }
    }
}
