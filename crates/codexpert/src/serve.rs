use crate::prelude::{eprintln, *};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use codexpert_core::types::GenerateRequest;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::expert::analyze::{analyze_data, AnalyzeOutput};
use crate::expert::create_file::{create_file_data, CreateFileOutput};
use crate::expert::generate::{generate_data, GenerateOutput};
use crate::llm::LmStudioConfig;

#[derive(Debug, clap::Parser)]
pub struct ServeOptions {
    /// Host to bind
    #[clap(long, env = "CODEXPERT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[clap(long, env = "CODEXPERT_PORT", default_value = "8000")]
    pub port: u16,

    /// LM Studio base URL
    #[clap(long)]
    pub api_url: Option<String>,

    /// Model name
    #[clap(long)]
    pub model: Option<String>,

    /// Directory of static frontend assets
    #[clap(long, env = "CODEXPERT_STATIC_DIR", default_value = "static")]
    pub static_dir: String,
}

pub struct AppState {
    config: LmStudioConfig,
    client: reqwest::Client,
    verbose: bool,
}

#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub prompt: String,
    pub technology: Option<String>,
    #[serde(default)]
    pub context_files: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CodebaseAnalysisRequest {
    pub directory: String,
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct FileCreationRequest {
    pub path: String,
    pub description: String,
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let config = LmStudioConfig::from_env()
        .with_overrides(options.api_url.clone(), options.model.clone());
    let client = crate::llm::create_client()?;

    let addr = format!("{}:{}", options.host, options.port);

    if global.verbose {
        eprintln!("Starting codexpert API on {}...", addr);
        eprintln!("LM Studio endpoint: {}", config.api_url);
        eprintln!("Model: {}", config.model);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(AppState {
        config,
        client,
        verbose: global.verbose,
    });

    let index = Path::new(&options.static_dir).join("index.html");
    let app_router = Router::new()
        .route("/generate", post(generate_handler))
        .route("/analyze", post(analyze_handler))
        .route("/create-file", post(create_file_handler))
        .route_service("/", ServeFile::new(index))
        .nest_service("/static", ServeDir::new(&options.static_dir))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CodeRequest>,
) -> Result<Json<GenerateOutput>, ApiError> {
    let files = crate::expert::read_context_files(&request.context_files, state.verbose).await;

    let generate_request = GenerateRequest {
        prompt: request.prompt,
        technology: request.technology,
        files,
    };

    let output = generate_data(&generate_request, &state.client, &state.config)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(output))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CodebaseAnalysisRequest>,
) -> Result<Json<AnalyzeOutput>, ApiError> {
    if !Path::new(&request.directory).is_dir() {
        return Err(ApiError::NotFound(format!(
            "Directory not found: {}",
            request.directory
        )));
    }

    let output = analyze_data(
        &request.directory,
        &request.query,
        &state.client,
        &state.config,
        state.verbose,
    )
    .await
    .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(output))
}

async fn create_file_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FileCreationRequest>,
) -> Result<Json<CreateFileOutput>, ApiError> {
    if Path::new(&request.path).exists() {
        return Err(ApiError::BadRequest("File already exists".to_string()));
    }

    let output = create_file_data(
        &request.path,
        &request.description,
        &state.client,
        &state.config,
    )
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(output))
}
