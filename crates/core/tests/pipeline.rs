use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use subgen_core::{
    Config, ErrorKind, JobWorkspace, OutputKind, Pipeline, Result, Segment, SubgenError,
    TimestampStyle, Transcriber, Transcript, Upload,
};

/// Returns fixed segments and remembers which file it was asked to read.
struct FakeTranscriber {
    segments: Vec<Segment>,
    fail_with: Option<String>,
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeTranscriber {
    fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            fail_with: None,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::new(Vec::new())
        }
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn transcribe(&self, video_path: &Path, _workspace: &JobWorkspace) -> Result<Transcript> {
        assert!(video_path.exists(), "video should be staged before transcription");
        self.seen.lock().unwrap().push(video_path.to_path_buf());

        if let Some(reason) = &self.fail_with {
            return Err(SubgenError::TranscriptionFailed {
                video_path: video_path.to_path_buf(),
                reason: reason.clone(),
            });
        }

        Ok(Transcript {
            text: self.segments.iter().map(|s| s.text.as_str()).collect(),
            segments: self.segments.clone(),
            language: "en".to_string(),
        })
    }
}

fn config_in(work_dir: &Path) -> Config {
    Config {
        work_dir: Some(work_dir.to_path_buf()),
        ..Config::default()
    }
}

fn upload() -> Upload {
    Upload::new("holiday.mp4", b"fake video bytes".to_vec())
}

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn test_srt_artifact_for_single_segment() {
    let root = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::with_transcriber(
        config_in(root.path()),
        Box::new(FakeTranscriber::new(vec![Segment::new(0.0, 2.0, "Hi")])),
    );

    let artifact = pipeline
        .generate(Some(upload()), OutputKind::Srt)
        .await
        .unwrap()
        .expect("artifact");

    assert_eq!(artifact.file_name, "subtitles.srt");
    assert_eq!(artifact.mime_type, "text/plain");
    assert_eq!(artifact.bytes, b"1\n0:00:00 --> 0:00:02\nHi\n\n");
}

#[tokio::test]
async fn test_configured_timestamp_style_is_used() {
    let root = tempfile::tempdir().unwrap();
    let mut config = config_in(root.path());
    config.subtitles.timestamp_style = TimestampStyle::Srt;

    let pipeline = Pipeline::with_transcriber(
        config,
        Box::new(FakeTranscriber::new(vec![Segment::new(1.5, 3.25, " hello ")])),
    );

    let artifact = pipeline
        .generate(Some(upload()), OutputKind::Srt)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        String::from_utf8(artifact.bytes).unwrap(),
        "1\n00:00:01,500 --> 00:00:03,250\nhello\n\n"
    );
}

#[tokio::test]
async fn test_no_upload_is_a_no_op() {
    let root = tempfile::tempdir().unwrap();
    let work_dir = root.path().join("jobs");
    let transcriber = FakeTranscriber::new(vec![Segment::new(0.0, 1.0, "x")]);
    let seen = Arc::clone(&transcriber.seen);
    let pipeline = Pipeline::with_transcriber(config_in(&work_dir), Box::new(transcriber));

    let result = pipeline.generate(None, OutputKind::EmbeddedVideo).await.unwrap();

    assert!(result.is_none());
    assert!(!work_dir.exists(), "no temporary files should be created");
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_container_is_rejected_before_staging() {
    let root = tempfile::tempdir().unwrap();
    let work_dir = root.path().join("jobs");
    let pipeline = Pipeline::with_transcriber(
        config_in(&work_dir),
        Box::new(FakeTranscriber::new(Vec::new())),
    );

    let err = pipeline
        .generate(Some(Upload::new("clip.webm", b"x".to_vec())), OutputKind::Srt)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(!work_dir.exists());
}

#[tokio::test]
async fn test_workspace_removed_after_success() {
    let root = tempfile::tempdir().unwrap();
    let transcriber = FakeTranscriber::new(vec![Segment::new(0.0, 1.0, "x")]);
    let seen = Arc::clone(&transcriber.seen);
    let pipeline = Pipeline::with_transcriber(config_in(root.path()), Box::new(transcriber));

    pipeline
        .generate(Some(upload()), OutputKind::Srt)
        .await
        .unwrap();

    let staged = seen.lock().unwrap()[0].clone();
    assert!(staged.starts_with(root.path()));
    assert!(!staged.exists());
    assert_eq!(entries(root.path()), 0);
}

#[tokio::test]
async fn test_workspace_removed_after_transcription_failure() {
    let root = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::with_transcriber(
        config_in(root.path()),
        Box::new(FakeTranscriber::failing("model exploded")),
    );

    let err = pipeline
        .generate(Some(upload()), OutputKind::Srt)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transcription);
    assert!(err.to_string().contains("model exploded"));
    assert_eq!(entries(root.path()), 0);
}

#[cfg(unix)]
mod embedding {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("ffmpeg");
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_embedding_failure_keeps_diagnostic_text() {
        let root = tempfile::tempdir().unwrap();
        let bin_dir = tempfile::tempdir().unwrap();
        let diagnostic = "[Parsed_subtitles_0 @ 0x5581] Unable to parse 'weird: option'\nError reinitializing filters!";

        let mut config = config_in(root.path());
        config.ffmpeg.bin = fake_ffmpeg(
            bin_dir.path(),
            &format!("printf '%s' \"{diagnostic}\" >&2\nexit 1\n"),
        );

        let pipeline = Pipeline::with_transcriber(
            config,
            Box::new(FakeTranscriber::new(vec![Segment::new(0.0, 2.0, "Hi")])),
        );

        let err = pipeline
            .generate(Some(upload()), OutputKind::EmbeddedVideo)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Embedding);
        match &err {
            SubgenError::EmbeddingFailed { reason, .. } => assert_eq!(reason, diagnostic),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.to_string(), format!("Error embedding subtitles: {diagnostic}"));
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_embedded_video_artifact() {
        let root = tempfile::tempdir().unwrap();
        let bin_dir = tempfile::tempdir().unwrap();

        // Writes the subtitle document it was given (from the -vf value)
        // into the output path, which is always the last argument.
        let mut config = config_in(root.path());
        config.ffmpeg.bin = fake_ffmpeg(
            bin_dir.path(),
            r#"for last; do :; done
srt=$(printf '%s' "$8" | sed -e 's/^subtitles=//' -e 's/:force_style=.*$//')
cat "$srt" > "$last"
"#,
        );

        let pipeline = Pipeline::with_transcriber(
            config,
            Box::new(FakeTranscriber::new(vec![
                Segment::new(0.0, 2.0, "Hi"),
                Segment::new(2.0, 3.5, " there "),
            ])),
        );

        let artifact = pipeline
            .generate(Some(upload()), OutputKind::EmbeddedVideo)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(artifact.file_name, "video_with_subtitles.mp4");
        assert_eq!(artifact.mime_type, "video/mp4");
        assert_eq!(
            String::from_utf8(artifact.bytes).unwrap(),
            "1\n00:00:00,000 --> 00:00:02,000\nHi\n\n2\n00:00:02,000 --> 00:00:03,500\nthere\n\n"
        );
        assert_eq!(entries(root.path()), 0);
    }
}
