//! Web API module for tileforms.
//!
//! This module provides a REST API that serves projected JSON Forms triples
//! to a browser-side form renderer and accepts saved form data.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/tiles` - List all tiles
//! - `GET /api/tiles/{id}` - Get one tile
//! - `GET /api/tiles/{id}/form` - Get the JSON Forms triple and editor per field
//! - `PUT /api/tiles/{id}/form` - Validate and save form data into the tile
//! - `POST /api/validate/national-id` - Check a national ID number

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::forms::{
    validate_national_id, DataSchema, EditorKind, FieldError, FormData, LayoutStyle,
    RendererRegistry, UiElement,
};
use crate::models::Tile;
use crate::services::{find_tile, replace_tile, EditSession, TileSource};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Tiles served and edited by the API
    tiles: Arc<RwLock<Vec<Tile>>>,
    /// Editor selection (immutable after startup)
    registry: Arc<RendererRegistry>,
    /// UI schema arrangement
    style: LayoutStyle,
    /// Where saved tiles are written back
    source: TileSource,
}

impl AppState {
    /// Creates a new application state from already loaded tiles.
    pub fn new(tiles: Vec<Tile>, config: &Config) -> Self {
        Self {
            tiles: Arc::new(RwLock::new(tiles)),
            registry: Arc::new(RendererRegistry::default()),
            style: config.layout_style(),
            source: config.tile_source(),
        }
    }

    /// Creates the state by fetching tiles from the configured source.
    pub async fn load(config: &Config) -> anyhow::Result<Self> {
        let tiles = config.tile_source().fetch_tiles().await?;
        info!("Loaded {} tiles", tiles.len());
        Ok(Self::new(tiles, config))
    }

    /// Returns a snapshot of the current tiles.
    pub async fn tiles(&self) -> Vec<Tile> {
        self.tiles.read().await.clone()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Tile list response.
#[derive(Debug, Serialize)]
pub struct TileListResponse {
    /// All tiles in display order.
    pub tiles: Vec<Tile>,
}

/// Form response handed to the form renderer.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    /// Data schema.
    pub schema: DataSchema,
    /// UI schema.
    pub uischema: UiElement,
    /// Initial form data.
    pub data: FormData,
    /// Editor selected for each field key.
    pub editors: IndexMap<String, EditorKind>,
}

/// Validation failure response.
#[derive(Debug, Serialize)]
pub struct FormErrorResponse {
    /// Field errors that blocked the save.
    pub errors: Vec<FieldError>,
}

/// National ID check request.
#[derive(Debug, Deserialize)]
pub struct NationalIdRequest {
    /// Value to check.
    pub value: String,
}

/// National ID check response.
#[derive(Debug, Serialize)]
pub struct NationalIdResponse {
    /// Whether the value is well-formed.
    pub valid: bool,
    /// Error messages (empty when valid).
    pub errors: Vec<String>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Rejects ids that cannot belong to a tile.
fn validate_tile_id(id: &str) -> Result<&str, ApiError> {
    if id.is_empty() {
        return Err(ApiError::new("Tile id cannot be empty"));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::with_details(
            "Invalid tile id",
            "Only letters, digits, '_' and '-' are allowed",
        ));
    }

    Ok(id)
}

fn tile_not_found(id: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(format!("Tile not found: {id}"))),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/tiles - List all tiles.
async fn list_tiles(State(state): State<AppState>) -> Json<TileListResponse> {
    Json(TileListResponse {
        tiles: state.tiles().await,
    })
}

/// GET /api/tiles/{id} - Get one tile.
async fn get_tile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tile>, (StatusCode, Json<ApiError>)> {
    let id = validate_tile_id(&id).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let tiles = state.tiles.read().await;
    find_tile(&tiles, id)
        .cloned()
        .map(Json)
        .ok_or_else(|| tile_not_found(id))
}

/// GET /api/tiles/{id}/form - Project a tile into a form.
async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResponse>, (StatusCode, Json<ApiError>)> {
    let id = validate_tile_id(&id).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let tile = {
        let tiles = state.tiles.read().await;
        find_tile(&tiles, id).cloned().ok_or_else(|| tile_not_found(id))?
    };

    let session = EditSession::new(tile, state.style, &state.registry);
    let editors = session.editors().into_iter().collect();
    let triple = session.triple().clone();

    Ok(Json(FormResponse {
        schema: triple.schema,
        uischema: triple.uischema,
        data: triple.data,
        editors,
    }))
}

/// PUT /api/tiles/{id}/form - Validate form data and save it into the tile.
async fn save_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<FormData>,
) -> Result<Json<Tile>, Response> {
    let id = validate_tile_id(&id)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(e)).into_response())?;

    // Held across validation so concurrent saves to one tile serialize
    let mut tiles = state.tiles.write().await;
    let tile = find_tile(&tiles, id)
        .cloned()
        .ok_or_else(|| tile_not_found(id).into_response())?;

    let saved = {
        let mut session = EditSession::new(tile, state.style, &state.registry);
        session.replace_data(data);
        session.save()
    };

    let updated = match saved {
        Ok(updated) => updated,
        Err(errors) => {
            warn!(tile = %id, count = errors.len(), "Rejected tile form");
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FormErrorResponse { errors }),
            )
                .into_response());
        }
    };

    // Persist first; the in-memory list only changes once the write succeeded
    let mut next = tiles.clone();
    replace_tile(&mut next, updated.clone());
    let persisted = persist_tiles(state.source.clone(), next.clone())
        .await
        .map_err(|e| {
            error!(tile = %updated.id, "Failed to persist tiles: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::with_details(
                    "Failed to persist tiles",
                    format!("{e:#}"),
                )),
            )
                .into_response()
        })?;

    *tiles = next;
    info!(tile = %updated.id, persisted, "Saved tile form");
    Ok(Json(updated))
}

/// Writes tiles back to the source off the async runtime.
async fn persist_tiles(source: TileSource, tiles: Vec<Tile>) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || source.store_tiles(&tiles)).await?
}

/// POST /api/validate/national-id - Check a national ID number.
async fn check_national_id(Json(request): Json<NationalIdRequest>) -> Json<NationalIdResponse> {
    let result = validate_national_id(&request.value);
    Json(NationalIdResponse {
        valid: result.is_ok(),
        errors: result.err().into_iter().collect(),
    })
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for development
    // NOTE: This permissive CORS policy is intended for local development only.
    // Restrict origins to the deployed frontend before exposing the server.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Tile endpoints
        .route("/api/tiles", get(list_tiles))
        .route("/api/tiles/{id}", get(get_tile))
        .route("/api/tiles/{id}/form", get(get_form).put(save_form))
        // Validation endpoints
        .route("/api/validate/national-id", post(check_national_id))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the tiles cannot be loaded or the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::load(&config).await?;
    let app = create_router(state);

    info!("Starting tileforms web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
