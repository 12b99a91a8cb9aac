//! Application state shared by all handlers

use subgen_core::{Config, Pipeline};

pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            pipeline: Pipeline::from_config(config),
        }
    }

    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn config(&self) -> &Config {
        self.pipeline.config()
    }
}
