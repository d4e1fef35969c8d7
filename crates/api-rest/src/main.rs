//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own with a lazily loaded model.
//!
//! ## Intended use
//! Useful for development when the model is retrained while the server is down. The
//! workspace's main `symptom-run` binary loads the model eagerly at startup instead.

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use symptom_core::{config::top_k_from_env_value, ClassifierService, CoreConfig};

/// Main entry point for the symptom checker REST API server
///
/// # Environment Variables
/// - `SYMPTOM_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `SYMPTOM_MODEL_DIR`: Directory holding the model artifacts (default: "models")
/// - `SYMPTOM_TOP_K`: Predictions per analysis (default: 3)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("symptom_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SYMPTOM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let model_dir = std::env::var("SYMPTOM_MODEL_DIR")
        .unwrap_or_else(|_| symptom_core::DEFAULT_MODEL_DIR.into());
    let top_k = top_k_from_env_value(std::env::var("SYMPTOM_TOP_K").ok())?;

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(model_dir), top_k)?);
    let classifier = Arc::new(ClassifierService::new(cfg));

    tracing::info!("-- Starting symptom checker REST API on {}", addr);

    let app = router(AppState::new(classifier));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
