use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use brickyard_lib::persistence::{require_identity, StoreError};
use brickyard_lib::state::WorldState;
use brickyard_lib::Error;
use serde_json::{json, Value};
use shared::{ErrorBody, GenerateRequest, GenerateResponse, NewWork, Work, WorkPatch};

use crate::AppState;

/// Header carrying the signed-in owner
const OWNER_HEADER: &str = "x-owner-id";

/// Error reply: status plus `{"error": ...}`
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorBody { error: self.1 })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Upstream(_) | Error::Format(_) => StatusCode::BAD_GATEWAY,
            Error::AuthRequired => StatusCode::UNAUTHORIZED,
        };
        ApiError(status, err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            StoreError::Io(_) | StoreError::Serde(_) => {
                tracing::error!("Store failure: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        ApiError(status, err.to_string())
    }
}

fn owner(headers: &HeaderMap) -> Result<String, ApiError> {
    let identity = headers.get(OWNER_HEADER).and_then(|v| v.to_str().ok());
    Ok(require_identity(identity)?.to_string())
}

fn check_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(Error::Validation("title must not be empty".into()).into());
    }
    Ok(())
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Assisted generation; returns the validated batch without applying it
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Some(generator) = state.generator.as_ref() else {
        return Err(ApiError(
            StatusCode::SERVICE_UNAVAILABLE,
            "assisted generation is not configured".into(),
        ));
    };
    let blocks = generator.generate(&request.prompt).await.map_err(|e| {
        tracing::warn!("Generation failed: {e}");
        ApiError::from(e)
    })?;
    Ok(Json(GenerateResponse { blocks }))
}

/// Caller's works, most recently updated first
pub async fn list_works(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Work>>, ApiError> {
    let owner = owner(&headers)?;
    Ok(Json(state.store.list_by_owner(&owner).await?))
}

pub async fn create_work(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<NewWork>,
) -> Result<(StatusCode, Json<Work>), ApiError> {
    let owner = owner(&headers)?;
    check_title(&draft.title)?;
    WorldState::check_unique_ids(&draft.blocks)?;
    let work = state.store.create(&owner, draft).await?;
    tracing::info!("Created work {} for {owner}", work.id);
    Ok((StatusCode::CREATED, Json(work)))
}

pub async fn update_work(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<WorkPatch>,
) -> Result<StatusCode, ApiError> {
    let owner = owner(&headers)?;
    if let Some(title) = &patch.title {
        check_title(title)?;
    }
    if let Some(blocks) = &patch.blocks {
        WorldState::check_unique_ids(blocks)?;
    }
    state.store.update(&owner, &id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_work(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let owner = owner(&headers)?;
    state.store.delete(&owner, &id).await?;
    tracing::info!("Deleted work {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// Public gallery
pub async fn list_public(State(state): State<AppState>) -> Result<Json<Vec<Work>>, ApiError> {
    Ok(Json(state.store.list_public().await?))
}
