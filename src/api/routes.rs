//! HTTP route handlers for the API

use super::AppState;
use crate::error::Result;
use crate::models::{Memory, MemoryInput};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

// ============================================================================
// Health Check
// ============================================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "ready": state.db.is_ready(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ============================================================================
// Memories
// ============================================================================

pub async fn create_memory(
    State(state): State<AppState>,
    Json(input): Json<MemoryInput>,
) -> Result<(StatusCode, Json<Memory>)> {
    let memory = state.memories.create(input).await?;
    Ok((StatusCode::CREATED, Json(memory)))
}

pub async fn list_memories(State(state): State<AppState>) -> Result<Json<Vec<Memory>>> {
    Ok(Json(state.memories.list().await?))
}

pub async fn get_memory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Memory>> {
    Ok(Json(state.memories.get(id).await?))
}

/// Full replacement of title, content and category
pub async fn update_memory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<MemoryInput>,
) -> Result<Json<Memory>> {
    Ok(Json(state.memories.update(id, input).await?))
}

pub async fn delete_memory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.memories.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Memory {} deleted successfully", id)
    })))
}
