//! ffmpeg invocations: audio extraction for transcription, and subtitle
//! burn-in.

use std::{ffi::OsString, path::Path};

use tokio::process::Command;

use crate::error::{Result, SubgenError};

/// ASS style overrides applied when burning subtitles into the picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleStyle {
    pub font_name: &'static str,
    pub font_size: u32,
    pub primary_colour: &'static str,
    pub outline_colour: &'static str,
    pub border_style: u8,
}

/// White Arial on an opaque box.
pub const BURN_IN_STYLE: SubtitleStyle = SubtitleStyle {
    font_name: "Arial",
    font_size: 24,
    primary_colour: "&Hffffff&",
    outline_colour: "&H000000&",
    border_style: 3,
};

impl SubtitleStyle {
    /// Value for the `force_style` option of ffmpeg's `subtitles` filter
    pub fn force_style(&self) -> String {
        format!(
            "FontName={},FontSize={},PrimaryColour={},OutlineColour={},BorderStyle={}",
            self.font_name,
            self.font_size,
            self.primary_colour,
            self.outline_colour,
            self.border_style
        )
    }
}

fn escape_with(value: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a path for use as a filter option value inside a filtergraph.
///
/// Two levels apply: option-value escaping (`\ : '`) and then filtergraph
/// escaping (`\ ' [ ] , ;`).
pub fn escape_filter_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let option_level = escape_with(&raw, &['\\', ':', '\'']);
    escape_with(&option_level, &['\\', '\'', '[', ']', ',', ';'])
}

/// `subtitles=<path>:force_style='<style>'`
pub fn burn_in_filter(subtitle_path: &Path, style: &SubtitleStyle) -> String {
    format!(
        "subtitles={}:force_style='{}'",
        escape_filter_path(subtitle_path),
        style.force_style()
    )
}

/// Arguments for burning `subtitle_path` into `video_path`.
///
/// Video is re-encoded because a filter cannot run on a copied stream; every
/// other stream is copied unchanged. An existing output file is overwritten.
pub fn burn_in_args(
    video_path: &Path,
    subtitle_path: &Path,
    output_path: &Path,
    style: &SubtitleStyle,
) -> Vec<OsString> {
    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-y".into(),
        "-i".into(),
        video_path.into(),
        "-vf".into(),
        burn_in_filter(subtitle_path, style).into(),
        "-c:a".into(),
        "copy".into(),
        output_path.into(),
    ]
}

/// Burn subtitles into a video using ffmpeg.
///
/// On failure the error carries ffmpeg's stderr exactly as it was written.
pub async fn embed_subtitles(
    ffmpeg_bin: &Path,
    video_path: &Path,
    subtitle_path: &Path,
    output_path: &Path,
    style: &SubtitleStyle,
) -> Result<()> {
    let failed = |reason: String| SubgenError::EmbeddingFailed {
        video_path: video_path.to_path_buf(),
        reason,
    };

    let output = Command::new(ffmpeg_bin)
        .args(burn_in_args(video_path, subtitle_path, output_path, style))
        .output()
        .await
        .map_err(|e| failed(format!("failed to run {}: {}", ffmpeg_bin.display(), e)))?;

    if !output.status.success() {
        return Err(failed(String::from_utf8_lossy(&output.stderr).to_string()));
    }

    Ok(())
}

/// Extract 16 kHz mono PCM audio from a video using ffmpeg
pub async fn extract_audio(ffmpeg_bin: &Path, video_path: &Path, audio_path: &Path) -> Result<()> {
    let failed = |reason: String| SubgenError::AudioExtractionFailed {
        video_path: video_path.to_path_buf(),
        reason,
    };

    let output = Command::new(ffmpeg_bin)
        .arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-y")
        .arg("-i")
        .arg(video_path)
        .arg("-vn")
        .arg("-acodec")
        .arg("pcm_s16le")
        .arg("-ar")
        .arg("16000")
        .arg("-ac")
        .arg("1")
        .arg(audio_path)
        .output()
        .await
        .map_err(|e| failed(format!("failed to run {}: {}", ffmpeg_bin.display(), e)))?;

    if !output.status.success() {
        return Err(failed(String::from_utf8_lossy(&output.stderr).to_string()));
    }

    Ok(())
}
