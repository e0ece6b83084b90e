use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::core::dms;
use crate::error::ApiError;
use crate::models::{AuthUser, CreateDmRequest, DmCreated, DmDetails, DmSummary};
use crate::store::DmId;
use crate::AppState;

/// POST /api/dms
pub async fn create_dm(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<CreateDmRequest>,
) -> Result<Json<DmCreated>, ApiError> {
    let mut ws = state.store.write().await;
    let dm_id = dms::create(&mut ws, user.id, &body.user_ids)?;
    state.persist(&ws);
    Ok(Json(DmCreated { dm_id }))
}

/// GET /api/dms
pub async fn list_dms(State(state): State<Arc<AppState>>, user: AuthUser) -> Json<Vec<DmSummary>> {
    let ws = state.store.read().await;
    Json(dms::list(&ws, user.id))
}

/// GET /api/dms/:dmId
pub async fn dm_details(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(dm_id): Path<DmId>,
) -> Result<Json<DmDetails>, ApiError> {
    let ws = state.store.read().await;
    Ok(Json(dms::details(&ws, user.id, dm_id)?))
}

/// POST /api/dms/:dmId/leave
pub async fn leave_dm(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(dm_id): Path<DmId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    dms::leave(&mut ws, user.id, dm_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// DELETE /api/dms/:dmId
pub async fn remove_dm(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(dm_id): Path<DmId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    dms::remove(&mut ws, user.id, dm_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}
