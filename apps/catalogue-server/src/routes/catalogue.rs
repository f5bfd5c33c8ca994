//! Catalogue API endpoints
//!
//! - POST /api/v1/catalogue         - Upload and index a catalogue (multipart)
//! - GET  /api/v1/catalogue         - Status of the loaded catalogue
//! - GET  /api/v1/catalogue/search  - Find the page holding a reference
//!
//! Upload reading and search are shared with [`super::legacy`], which serves
//! the same operations under the French paths and field names.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, DefaultBodyLimit, Multipart, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalogue::{CatalogueError, CatalogueStatus, LoadSummary, SearchOutcome};
use crate::state::AppState;

/// Multipart field names accepted for the catalogue file
const FILE_FIELDS: [&str; 3] = ["file", "fichier", "pdf"];

/// Load response
#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub success: bool,
    pub total_pages: usize,
    pub indexed_keys: usize,
    pub message: String,
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_keys: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Search response
///
/// `page` and `image_base64` are always present (null on a miss);
/// `total_pages` only accompanies a match.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub found: bool,
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    pub image_base64: Option<String>,
}

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Reference to look up
    #[serde(alias = "q")]
    pub reference: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for CatalogueError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        });

        (self.status_code(), body).into_response()
    }
}

impl From<LoadSummary> for LoadResponse {
    fn from(summary: LoadSummary) -> Self {
        Self {
            success: true,
            total_pages: summary.total_pages,
            indexed_keys: summary.indexed_keys,
            message: "Catalogue indexed successfully".to_string(),
        }
    }
}

impl From<CatalogueStatus> for StatusResponse {
    fn from(status: CatalogueStatus) -> Self {
        match status {
            CatalogueStatus::Empty => Self {
                loaded: false,
                total_pages: None,
                indexed_keys: None,
                source_name: None,
                fingerprint: None,
                loaded_at: None,
                message: Some("No catalogue loaded".to_string()),
            },
            CatalogueStatus::Loaded {
                total_pages,
                indexed_keys,
                source_name,
                fingerprint,
                loaded_at,
            } => Self {
                loaded: true,
                total_pages: Some(total_pages),
                indexed_keys: Some(indexed_keys),
                source_name,
                fingerprint: Some(fingerprint),
                loaded_at: Some(loaded_at),
                message: None,
            },
        }
    }
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            found: outcome.found(),
            query: outcome.query,
            page: outcome.page,
            total_pages: outcome.total_pages,
            image_base64: outcome.image_base64,
        }
    }
}

/// Create the catalogue router
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(catalogue_status).post(load_catalogue))
        .route("/search", get(search_catalogue))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Upload a catalogue and index it, replacing the current one
async fn load_catalogue(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<LoadResponse>, CatalogueError> {
    let summary = index_upload(&state, multipart).await?;
    Ok(Json(summary.into()))
}

/// Describe the loaded catalogue
async fn catalogue_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.catalogue().status().into())
}

/// Look up a reference
async fn search_catalogue(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, CatalogueError> {
    let outcome = run_search(&state, query).await?;
    Ok(Json(outcome.into()))
}

/// Read the catalogue file out of a multipart body and index it
pub(crate) async fn index_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<LoadSummary, CatalogueError> {
    let (data, filename) = read_upload(&mut multipart).await?;
    tracing::debug!("Read {} bytes of catalogue data", data.len());

    state
        .catalogue()
        .load(data.to_vec(), filename.clone())
        .await
        .map_err(|e| {
            tracing::error!("Failed to index catalogue {:?}: {}", filename, e);
            e
        })
}

/// Pick the catalogue file: a known field name first, else the first field
/// carrying a filename
async fn read_upload(
    multipart: &mut Multipart,
) -> Result<(Bytes, Option<String>), CatalogueError> {
    let mut fallback: Option<(Bytes, Option<String>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or("").to_string();
        let filename = field.file_name().map(|s| s.to_string());

        tracing::debug!(
            "Received field: name='{}', filename={:?}, content_type={:?}",
            name,
            filename,
            field.content_type()
        );

        if FILE_FIELDS.contains(&name.as_str()) {
            let data = field.bytes().await.map_err(upload_error)?;
            return Ok((data, filename));
        }

        if fallback.is_none() && filename.is_some() {
            let data = field.bytes().await.map_err(upload_error)?;
            fallback = Some((data, filename));
        }
    }

    fallback.ok_or_else(|| {
        tracing::warn!("No file field found in catalogue upload");
        CatalogueError::EmptyUpload
    })
}

fn upload_error(e: axum::extract::multipart::MultipartError) -> CatalogueError {
    tracing::error!("Failed to read multipart upload: {}", e);
    CatalogueError::InvalidUpload(e.body_text())
}

/// Resolve the `reference` parameter against the loaded catalogue
pub(crate) async fn run_search(
    state: &AppState,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<SearchOutcome, CatalogueError> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("Rejected search query: {}", rejection.body_text());
        CatalogueError::InvalidQuery(rejection.body_text())
    })?;

    state.catalogue().search(&query.reference).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentError;
    use axum::http::StatusCode;

    #[test]
    fn test_search_response_on_miss_serializes_nulls() {
        let response = SearchResponse::from(SearchOutcome {
            query: "Sprocket".to_string(),
            page: None,
            total_pages: None,
            image_base64: None,
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "query": "Sprocket",
                "found": false,
                "page": null,
                "image_base64": null,
            })
        );
    }

    #[test]
    fn test_status_response_when_empty() {
        let json = serde_json::to_value(StatusResponse::from(CatalogueStatus::Empty)).unwrap();
        assert_eq!(json["loaded"], false);
        assert!(json.get("total_pages").is_none());
        assert_eq!(json["message"], "No catalogue loaded");
    }

    #[test]
    fn test_load_response_from_summary() {
        let json = serde_json::to_value(LoadResponse::from(LoadSummary {
            total_pages: 3,
            indexed_keys: 4,
            fingerprint: "ab".repeat(32),
            replaced_previous: false,
        }))
        .unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["indexed_keys"], 4);
    }

    #[test]
    fn test_error_response_status() {
        let response = CatalogueError::NotIndexed.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            CatalogueError::Parse(DocumentError::Malformed("no trailer".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = CatalogueError::InvalidQuery("missing field `reference`".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
