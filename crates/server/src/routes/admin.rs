use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::core::users;
use crate::error::ApiError;
use crate::models::{AuthUser, ChangePermissionRequest};
use crate::store::UserId;
use crate::AppState;

/// DELETE /api/admin/users/:userId
pub async fn remove_user(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    users::remove_user(&mut ws, user.id, user_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// PATCH /api/admin/users/:userId/permissions
pub async fn change_permission(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(user_id): Path<UserId>,
    Json(body): Json<ChangePermissionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    users::change_permission(&mut ws, user.id, user_id, body.permission_level)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}
