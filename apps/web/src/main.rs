//! subgen web UI
//!
//! Serves one page where a video can be uploaded and turned into a subtitle
//! file, or into a copy of the video with the subtitles burned in.

mod http;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use subgen_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "subgen-web";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    tracing::info!("{} v{} starting", APP_NAME, VERSION);

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("subgen.toml"));
    let config = Config::load_or_default(&config_path);
    tracing::info!("Configuration loaded: {:?}", config);

    let addr = config.server.socket_addr();
    let state = Arc::new(AppState::new(config));
    tracing::info!("Transcription engine: {}", state.pipeline.transcriber_name());

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subgen_web=info,subgen_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
