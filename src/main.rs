use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use symptom_core::{ClassifierService, CoreConfig, config::top_k_from_env_value};

/// Main entry point for the symptom checker
///
/// Resolves configuration from the environment, loads any persisted model up front so the
/// first request does not pay for it, then serves the REST API.
///
/// A missing model is not fatal: the server starts and analysis requests answer
/// `503 Service Unavailable` until a model is trained with `symptom train`.
///
/// # Environment Variables
/// - `SYMPTOM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SYMPTOM_MODEL_DIR`: Directory holding the model artifacts (default: "models")
/// - `SYMPTOM_TOP_K`: Predictions per analysis (default: 3)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptom_run=info".parse()?)
                .add_directive("symptom_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SYMPTOM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let model_dir = std::env::var("SYMPTOM_MODEL_DIR")
        .unwrap_or_else(|_| symptom_core::DEFAULT_MODEL_DIR.into());
    let top_k = top_k_from_env_value(std::env::var("SYMPTOM_TOP_K").ok())?;

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(model_dir), top_k)?);
    let classifier = Arc::new(ClassifierService::new(cfg.clone()));

    match classifier.load() {
        Ok(true) => tracing::info!("++ Model loaded from {}", cfg.model_dir().display()),
        Ok(false) => tracing::warn!(
            "No model in {}; train one with `symptom train <dataset>`",
            cfg.model_dir().display()
        ),
        Err(e) => tracing::error!("Saved model could not be loaded: {}", e),
    }

    tracing::info!("++ Starting symptom checker REST on {}", rest_addr);

    let app = router(AppState::new(classifier));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
