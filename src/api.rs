//! HTTP surface: router construction and request handlers.
//!
//! The router is built in the library so integration tests can drive it
//! in-process with `tower::ServiceExt`.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{GeneratorError, ServiceError};
use crate::generator::ReadmeGenerator;
use crate::models::{ProjectDetails, ReadmeResponse, ScanResult};
use crate::scanner::ProjectScanner;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    scanner: Arc<ProjectScanner>,
    generator: Arc<ReadmeGenerator>,
}

impl AppState {
    /// Builds the shared state from configuration
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self {
            scanner: Arc::new(ProjectScanner::new(config.scan.clone())),
            generator: Arc::new(ReadmeGenerator::new(config.llm.clone())?),
        })
    }
}

/// Request payload for analyzing a project directory
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Local filesystem path of the project to scan
    pub project_path: String,
}

type ErrorBody = (StatusCode, ResponseJson<Value>);

/// Create the main application with all routes
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
        .route("/api/analyze-project", post(analyze_project))
        .route("/api/generate-readme", post(generate_readme))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint - returns basic service information
async fn index() -> ResponseJson<Value> {
    ResponseJson(json!({
        "service": "readmegen",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Project scanning and README draft generation",
        "endpoints": {
            "health": "/health",
            "analyze": "/api/analyze-project",
            "generate": "/api/generate-readme"
        }
    }))
}

/// Health check endpoint
async fn health_check() -> ResponseJson<Value> {
    ResponseJson(json!({
        "service": "readmegen",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Analyze a project directory and return its structure and tech stack
async fn analyze_project(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<ResponseJson<ScanResult>, ErrorBody> {
    info!("analyzing project at {}", request.project_path);

    match state.scanner.scan(Path::new(&request.project_path)).await {
        Ok(result) => Ok(ResponseJson(result)),
        Err(e) => {
            let service_error = ServiceError::from(e);
            let status = if service_error.is_not_found() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error!("scan failed: {}", service_error);
            Err(detail(status, &service_error.to_string()))
        }
    }
}

/// Generate three README variants from a project description
async fn generate_readme(
    State(state): State<AppState>,
    Json(project): Json<ProjectDetails>,
) -> Result<ResponseJson<ReadmeResponse>, ErrorBody> {
    info!("generating README variants for {}", project.project_name);

    match state.generator.generate(&project).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(e) => {
            error!("README generation failed: {}", e);
            let message = match &e {
                GeneratorError::Upstream(_) | GeneratorError::Http(_) => {
                    format!("Text generation error: {e}")
                }
                GeneratorError::MalformedResponse(_) => e.to_string(),
            };
            Err(detail(StatusCode::INTERNAL_SERVER_ERROR, &message))
        }
    }
}

fn detail(status: StatusCode, message: &str) -> ErrorBody {
    (status, ResponseJson(json!({ "detail": message })))
}
