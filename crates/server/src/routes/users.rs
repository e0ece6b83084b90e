use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::core::users;
use crate::error::ApiError;
use crate::models::{
    AuthUser, SetEmailRequest, SetHandleRequest, SetNameRequest, UserProfile, UserStats,
    WorkspaceStats,
};
use crate::store::UserId;
use crate::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<Arc<AppState>>, _user: AuthUser) -> Json<Vec<UserProfile>> {
    let ws = state.store.read().await;
    Json(users::list_all(&ws))
}

/// GET /api/users/:userId
pub async fn user_profile(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserProfile>, ApiError> {
    let ws = state.store.read().await;
    Ok(Json(users::profile(&ws, user_id)?))
}

/// PATCH /api/users/me/name
pub async fn set_name(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<SetNameRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    users::set_name(&mut ws, user.id, body.name_first.trim(), body.name_last.trim())?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// PATCH /api/users/me/email
pub async fn set_email(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<SetEmailRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    users::set_email(&mut ws, user.id, &body.email)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// PATCH /api/users/me/handle
pub async fn set_handle(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<SetHandleRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    users::set_handle(&mut ws, user.id, body.handle.trim())?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// GET /api/users/me/stats
pub async fn user_stats(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<UserStats>, ApiError> {
    let ws = state.store.read().await;
    Ok(Json(users::stats(&ws, user.id)?))
}

/// GET /api/workspace/stats
pub async fn workspace_stats(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Json<WorkspaceStats> {
    let ws = state.store.read().await;
    Json(users::workspace_stats(&ws))
}
