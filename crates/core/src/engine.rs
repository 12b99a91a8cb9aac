use std::fmt;

use serde::{Deserialize, Serialize};

/// Speech-to-text backend used for transcription.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
    /// whisper.cpp linked in-process through `whisper-rs`
    #[default]
    WhisperRs,
    /// The `whisper` command-line tool
    WhisperCli,
}

impl Engine {
    pub fn name(&self) -> &'static str {
        match self {
            Engine::WhisperRs => "whisper.cpp",
            Engine::WhisperCli => "whisper CLI",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Engine::WhisperRs => "whisper-rs",
            Engine::WhisperCli => "whisper-cli",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_ids_match_config_spelling() {
        for engine in [Engine::WhisperRs, Engine::WhisperCli] {
            let value: toml::Value = toml::Value::String(engine.id().to_string());
            assert_eq!(value.try_into::<Engine>().unwrap(), engine);
        }
        assert_eq!(Engine::default().to_string(), "whisper-rs");
    }
}
