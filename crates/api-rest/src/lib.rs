//! # API REST
//!
//! REST API for the symptom checker.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status codes)
//! - Per-user analysis history
//!
//! Classification itself lives in `symptom-core`; this crate only translates requests into
//! [`ClassifierService`] calls and core errors into HTTP responses.

#![warn(rust_2018_idioms)]

pub mod history;
pub mod schemas;

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use symptom_core::{ClassifierError, ClassifierService, Urgency};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use history::HistoryStore;
use schemas::{
    ConditionPrediction, HealthRes, HistoryEntry, ModelInfoRes, RootRes, SymptomInput,
    SymptomResponse, UserHistoryRes,
};

const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Monitor symptoms closely",
    "Stay hydrated and get adequate rest",
    "Consult a healthcare provider if symptoms persist or worsen",
];

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<ClassifierService>,
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(classifier: Arc<ClassifierService>) -> Self {
        Self {
            classifier,
            history: HistoryStore::new(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(root, health, analyze_symptoms, user_history, model_info),
    components(schemas(
        RootRes,
        HealthRes,
        SymptomInput,
        SymptomResponse,
        ConditionPrediction,
        HistoryEntry,
        UserHistoryRes,
        ModelInfoRes,
    ))
)]
pub struct ApiDoc;

/// Build the full router: API routes under `/api`, Swagger UI, and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/analyze-symptoms", post(analyze_symptoms))
        .route("/api/user-history/:user_id", get(user_history))
        .route("/api/model-info", get(model_info))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Translate a core error into a status code and user-facing message.
fn error_response(e: &ClassifierError) -> (StatusCode, &'static str) {
    match e {
        ClassifierError::ModelNotTrained => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Model not trained. Please train the model first using `symptom train`",
        ),
        ClassifierError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input"),
        e if e.is_model_load() => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Saved model could not be loaded. Please retrain the model",
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error analyzing symptoms",
        ),
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = RootRes)
    )
)]
async fn root() -> Json<RootRes> {
    Json(RootRes {
        message: "AI Symptom Checker API".into(),
        status: "running".into(),
        docs: "/docs".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        status: "healthy".into(),
        timestamp: now(),
    })
}

#[utoipa::path(
    post,
    path = "/api/analyze-symptoms",
    request_body = SymptomInput,
    responses(
        (status = 200, description = "Ranked conditions", body = SymptomResponse),
        (status = 400, description = "Bad request"),
        (status = 503, description = "Model not trained"),
        (status = 500, description = "Internal server error")
    )
)]
/// Analyse free-text symptoms with the trained classifier
///
/// Returns up to the configured number of ranked conditions together with the highest urgency
/// among them and up to three merged recommendations. When the classifier has no opinion
/// (e.g. the text has no usable words) a single "Unknown" placeholder is returned. Every
/// successful analysis is appended to the caller's history.
///
/// # Errors
/// Returns `400 Bad Request` if severity is outside 1-10,
/// `503 Service Unavailable` if no usable model exists, or
/// `500 Internal Server Error` for other failures.
#[axum::debug_handler]
async fn analyze_symptoms(
    State(state): State<AppState>,
    Json(input): Json<SymptomInput>,
) -> Result<Json<SymptomResponse>, (StatusCode, &'static str)> {
    if !(1..=10).contains(&input.severity) {
        return Err((StatusCode::BAD_REQUEST, "severity must be between 1 and 10"));
    }

    let analysis = match state.classifier.analyze(&input.symptoms) {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::error!("Analyze symptoms error: {:?}", e);
            return Err(error_response(&e));
        }
    };

    let (predictions, urgency) = if analysis.predictions.is_empty() {
        let unknown = ConditionPrediction {
            condition: "Unknown".into(),
            probability: 0.1,
            description: "Unable to determine condition from symptoms".into(),
            urgency: Urgency::Routine.as_str().into(),
            recommendations: vec![
                "Consult with a healthcare provider for proper diagnosis".into(),
            ],
        };
        (vec![unknown], Urgency::Routine)
    } else {
        let urgency = analysis.urgency.unwrap_or_default();
        let predictions = analysis
            .predictions
            .into_iter()
            .map(ConditionPrediction::from)
            .collect::<Vec<_>>();
        (predictions, urgency)
    };

    let recommendations = if analysis.recommendations.is_empty() {
        FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
    } else {
        analysis.recommendations
    };

    let timestamp = now();
    state.history.record(
        &input.user_id,
        HistoryEntry {
            symptoms: input.symptoms,
            severity: input.severity,
            duration: input.duration,
            timestamp: timestamp.clone(),
            predictions: predictions.clone(),
        },
    );

    Ok(Json(SymptomResponse {
        predictions,
        urgency: urgency.as_str().into(),
        recommendations,
        timestamp,
        model_status: "active".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/user-history/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User's analysis history", body = UserHistoryRes)
    )
)]
#[axum::debug_handler]
async fn user_history(
    State(state): State<AppState>,
    AxumPath(user_id): AxumPath<String>,
) -> Json<UserHistoryRes> {
    let entries = state.history.entries(&user_id);
    Json(UserHistoryRes {
        total_entries: entries.len(),
        user_id,
        entries,
    })
}

#[utoipa::path(
    get,
    path = "/api/model-info",
    responses(
        (status = 200, description = "Installed model status", body = ModelInfoRes)
    )
)]
#[axum::debug_handler]
async fn model_info(State(state): State<AppState>) -> Json<ModelInfoRes> {
    Json(state.classifier.model_info().into())
}
