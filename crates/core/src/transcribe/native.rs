use std::{
    path::{Path, PathBuf},
    sync::Once,
};

use async_trait::async_trait;
use tokio::{fs, process::Command};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::{
    cache::{get_model_path, model_download_url},
    engine::Engine,
    error::{Result, SubgenError},
    ffmpeg::extract_audio,
    transcribe::Transcriber,
    types::{Segment, Transcript},
    workspace::JobWorkspace,
};

extern "C" fn whisper_log_callback(
    _level: u32,
    _message: *const std::ffi::c_char,
    _user_data: *mut std::ffi::c_void,
) {
    // silent
}

static SILENCE_WHISPER: Once = Once::new();

/// Download the ggml weights for `model` into `model_dir` unless present.
pub async fn ensure_model(model_dir: &Path, model: &str) -> Result<PathBuf> {
    let model_path = get_model_path(model_dir, model);
    if model_path.exists() {
        return Ok(model_path);
    }

    let download_url = model_download_url(model);
    tracing::info!("Downloading Whisper model {} from {}", model, download_url);
    download(&download_url, &model_path).await?;
    Ok(model_path)
}

/// Fetch `url` into `dest` through a uniquely named file in the same
/// directory, so concurrent first-use downloads never share a partial file.
async fn download(url: &str, dest: &Path) -> Result<()> {
    let failed = |reason: String| SubgenError::ModelDownloadFailed {
        url: url.to_string(),
        reason,
    };
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(dir)
        .await
        .map_err(|e| failed(format!("failed to create {}: {}", dir.display(), e)))?;
    let partial = tempfile::Builder::new()
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(|e| failed(format!("failed to create a file in {}: {}", dir.display(), e)))?;

    let output = Command::new("curl")
        .arg("-fsSL")
        .arg(url)
        .arg("-o")
        .arg(partial.path())
        .output()
        .await
        .map_err(|e| failed(format!("failed to run curl: {}", e)))?;

    if !output.status.success() {
        return Err(failed(String::from_utf8_lossy(&output.stderr).to_string()));
    }

    partial
        .persist(dest)
        .map_err(|e| failed(format!("failed to move model into {}: {}", dest.display(), e)))?;
    Ok(())
}

/// whisper.cpp through `whisper-rs`, fed with audio extracted by ffmpeg.
pub struct WhisperRsTranscriber {
    model: String,
    model_dir: PathBuf,
    use_gpu: bool,
    ffmpeg_bin: PathBuf,
}

impl WhisperRsTranscriber {
    pub fn new(model: String, model_dir: PathBuf, use_gpu: bool, ffmpeg_bin: PathBuf) -> Self {
        SILENCE_WHISPER.call_once(|| unsafe {
            whisper_rs::set_log_callback(Some(whisper_log_callback), std::ptr::null_mut());
        });

        Self {
            model,
            model_dir,
            use_gpu,
            ffmpeg_bin,
        }
    }
}

fn run_whisper(
    audio_path: &Path,
    model_path: &Path,
    use_gpu: bool,
) -> std::result::Result<Transcript, String> {
    let mut reader = hound::WavReader::open(audio_path).map_err(|e| e.to_string())?;
    let samples: Vec<f32> = reader
        .samples::<i16>()
        .map(|s| s.map(|s| s as f32 / i16::MAX as f32))
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| e.to_string())?;

    let ctx_params = WhisperContextParameters {
        use_gpu,
        flash_attn: use_gpu,
        ..Default::default()
    };
    let model_path = model_path
        .to_str()
        .ok_or_else(|| format!("model path {} is not UTF-8", model_path.display()))?;
    let ctx = WhisperContext::new_with_params(model_path, ctx_params)
        .map_err(|e| format!("failed to load model: {e}"))?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 5 });
    params.set_language(Some("auto"));
    params.set_print_progress(false);
    params.set_print_realtime(false);

    let mut state = ctx
        .create_state()
        .map_err(|e| format!("failed to create state: {e}"))?;
    state
        .full(params, &samples)
        .map_err(|e| format!("failed to run model: {e}"))?;

    let mut text = String::new();
    let mut segments: Vec<Segment> = Vec::new();

    for segment in state.as_iter() {
        let seg_text = match segment.to_str() {
            Ok(s) => s,
            Err(_) => continue,
        };
        // whisper.cpp timestamps are in centiseconds
        segments.push(Segment {
            start: segment.start_timestamp() as f64 / 100.0,
            end: segment.end_timestamp() as f64 / 100.0,
            text: seg_text.to_string(),
        });
        text.push_str(seg_text);
    }

    let language_index = state.full_lang_id_from_state();
    let language = whisper_rs::get_lang_str(language_index);

    Ok(Transcript {
        language: language.unwrap_or("Unknown").to_string(),
        segments,
        text,
    })
}

#[async_trait]
impl Transcriber for WhisperRsTranscriber {
    fn name(&self) -> &'static str {
        Engine::WhisperRs.name()
    }

    async fn transcribe(&self, video_path: &Path, workspace: &JobWorkspace) -> Result<Transcript> {
        let audio_path = workspace.audio_path();
        extract_audio(&self.ffmpeg_bin, video_path, &audio_path).await?;

        let model_path = ensure_model(&self.model_dir, &self.model).await?;
        tracing::info!("Transcribing with {} ({})", self.name(), self.model);

        let use_gpu = self.use_gpu;
        let failed = |reason: String| SubgenError::TranscriptionFailed {
            video_path: video_path.to_path_buf(),
            reason,
        };

        tokio::task::spawn_blocking(move || run_whisper(&audio_path, &model_path, use_gpu))
            .await
            .map_err(|e| failed(e.to_string()))?
            .map_err(failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_model_reuses_cached_file() {
        let dir = tempfile::tempdir().unwrap();
        let cached = dir.path().join("ggml-tiny.bin");
        std::fs::write(&cached, b"weights").unwrap();

        let path = ensure_model(dir.path(), "tiny").await.unwrap();
        assert_eq!(path, cached);
        assert_eq!(std::fs::read(&path).unwrap(), b"weights");
    }

    #[tokio::test]
    async fn test_model_dir_failure_is_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let err = ensure_model(&blocker.join("models"), "tiny").await.unwrap_err();
        assert!(matches!(err, SubgenError::ModelDownloadFailed { .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::Transcription);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_concurrent_downloads_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("remote.bin");
        std::fs::write(&source, b"weights").unwrap();
        let url = format!("file://{}", source.display());

        let models = dir.path().join("models");
        let dest = models.join("ggml-tiny.bin");
        let (a, b) = tokio::join!(download(&url, &dest), download(&url, &dest));
        a.unwrap();
        b.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"weights");
        assert_eq!(std::fs::read_dir(&models).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_download_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("file://{}", dir.path().join("missing.bin").display());

        let models = dir.path().join("models");
        let err = download(&url, &models.join("ggml-tiny.bin")).await.unwrap_err();

        assert!(matches!(err, SubgenError::ModelDownloadFailed { .. }));
        assert_eq!(std::fs::read_dir(&models).unwrap().count(), 0);
    }
}
