use std::path::{Path, PathBuf};

pub const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("subgen")
}

pub fn get_model_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join("models")
}

/// ggml file name for a Whisper model name, e.g. `large-v3` -> `ggml-large-v3.bin`
pub fn model_file_name(model: &str) -> String {
    format!("ggml-{}.bin", model)
}

pub fn get_model_path(model_dir: &Path, model: &str) -> PathBuf {
    model_dir.join(model_file_name(model))
}

pub fn model_download_url(model: &str) -> String {
    format!("{}/{}", MODEL_BASE_URL, model_file_name(model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_paths() {
        let dir = Path::new("/cache/subgen/models");
        assert_eq!(
            get_model_path(dir, "large-v3"),
            PathBuf::from("/cache/subgen/models/ggml-large-v3.bin")
        );
        assert_eq!(
            model_download_url("base.en"),
            "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin"
        );
        assert!(get_root_cache_dir().ends_with("subgen"));
    }
}
