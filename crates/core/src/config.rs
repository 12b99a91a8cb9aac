//! Configuration
//!
//! Loaded from a TOML file. Every section and field is optional; anything
//! left out falls back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    cache::{get_model_dir, get_root_cache_dir},
    engine::Engine,
    error::{Result, SubgenError},
    format::TimestampStyle,
};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Largest accepted upload in megabytes
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            max_upload_mb: 2048,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

/// Speech-to-text settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub engine: Engine,

    /// Whisper model name, e.g. `large-v3`, `medium`, `base.en`
    pub model: String,

    /// Where ggml models are cached. Defaults to `<user cache>/subgen/models`
    pub model_dir: Option<PathBuf>,

    /// `whisper` executable, used by the `whisper-cli` engine
    pub whisper_bin: PathBuf,

    pub use_gpu: bool,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            model: "large-v3".to_string(),
            model_dir: None,
            whisper_bin: PathBuf::from("whisper"),
            use_gpu: true,
        }
    }
}

impl TranscriptionConfig {
    pub fn resolved_model_dir(&self) -> PathBuf {
        self.model_dir
            .clone()
            .unwrap_or_else(|| get_model_dir(&get_root_cache_dir()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleConfig {
    pub timestamp_style: TimestampStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FfmpegConfig {
    /// `ffmpeg` executable
    pub bin: PathBuf,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            bin: PathBuf::from("ffmpeg"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub transcription: TranscriptionConfig,
    pub subtitles: SubtitleConfig,
    pub ffmpeg: FfmpegConfig,

    /// Parent directory for per-job temporary workspaces. Defaults to the
    /// system temp directory.
    pub work_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SubgenError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists. A missing file yields the defaults; an
    /// unreadable or invalid one is logged and also yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
