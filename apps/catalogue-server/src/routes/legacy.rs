//! French-named routes kept for existing catalogue clients
//!
//! - POST /indexer   - Upload and index a catalogue (multipart)
//! - GET  /status    - Status of the loaded catalogue
//! - GET  /chercher  - Find the page holding a reference
//!
//! Same operations as [`super::catalogue`], answered with the field names
//! these clients read and a `{"detail": ...}` body on failure.

use axum::{
    extract::{rejection::QueryRejection, DefaultBodyLimit, Multipart, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::catalogue::{index_upload, run_search, SearchQuery};
use crate::catalogue::{CatalogueError, CatalogueStatus, LoadSummary, SearchOutcome};
use crate::state::AppState;

const NOT_LOADED: &str = "Aucun catalogue chargé";

/// `POST /indexer` response
#[derive(Debug, Serialize)]
pub struct LegacyLoadResponse {
    pub succes: bool,
    pub total_pages: usize,
    pub mots_indexes: usize,
    pub message: String,
}

/// `GET /status` response
#[derive(Debug, Serialize)]
pub struct LegacyStatusResponse {
    pub catalogue_charge: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mots_indexes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /chercher` response
#[derive(Debug, Serialize)]
pub struct LegacySearchResponse {
    pub reference: String,
    pub trouvee: bool,
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    pub image_base64: Option<String>,
}

/// Failure body: `{"detail": "..."}`
#[derive(Debug, Serialize)]
pub struct LegacyErrorResponse {
    pub detail: String,
}

/// Catalogue error answered in the legacy shape, same status code
#[derive(Debug)]
pub struct LegacyError(pub CatalogueError);

impl From<CatalogueError> for LegacyError {
    fn from(err: CatalogueError) -> Self {
        Self(err)
    }
}

impl IntoResponse for LegacyError {
    fn into_response(self) -> Response {
        let detail = match &self.0 {
            CatalogueError::NotIndexed => format!("{}. Appelez d'abord /indexer", NOT_LOADED),
            other => other.to_string(),
        };

        (self.0.status_code(), Json(LegacyErrorResponse { detail })).into_response()
    }
}

impl From<LoadSummary> for LegacyLoadResponse {
    fn from(summary: LoadSummary) -> Self {
        Self {
            succes: true,
            total_pages: summary.total_pages,
            mots_indexes: summary.indexed_keys,
            message: "Catalogue indexé avec succès".to_string(),
        }
    }
}

impl From<CatalogueStatus> for LegacyStatusResponse {
    fn from(status: CatalogueStatus) -> Self {
        match status {
            CatalogueStatus::Empty => Self {
                catalogue_charge: false,
                total_pages: None,
                mots_indexes: None,
                message: Some(NOT_LOADED.to_string()),
            },
            CatalogueStatus::Loaded {
                total_pages,
                indexed_keys,
                ..
            } => Self {
                catalogue_charge: true,
                total_pages: Some(total_pages),
                mots_indexes: Some(indexed_keys),
                message: None,
            },
        }
    }
}

impl From<SearchOutcome> for LegacySearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            trouvee: outcome.found(),
            reference: outcome.query,
            page: outcome.page,
            total_pages: outcome.total_pages,
            image_base64: outcome.image_base64,
        }
    }
}

/// Create the legacy router, mounted at the root
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/indexer", post(indexer))
        .route("/status", get(status))
        .route("/chercher", get(chercher))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

async fn indexer(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<LegacyLoadResponse>, LegacyError> {
    let summary = index_upload(&state, multipart).await?;
    Ok(Json(summary.into()))
}

async fn status(State(state): State<AppState>) -> Json<LegacyStatusResponse> {
    Json(state.catalogue().status().into())
}

async fn chercher(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<LegacySearchResponse>, LegacyError> {
    let outcome = run_search(&state, query).await?;
    Ok(Json(outcome.into()))
}
