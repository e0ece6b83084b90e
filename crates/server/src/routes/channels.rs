use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::core::channels;
use crate::error::ApiError;
use crate::models::{
    AuthUser, ChannelCreated, ChannelDetails, ChannelSummary, CreateChannelRequest, MemberRequest,
};
use crate::store::{ChannelId, UserId};
use crate::AppState;

/// POST /api/channels
pub async fn create_channel(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(body): Json<CreateChannelRequest>,
) -> Result<Json<ChannelCreated>, ApiError> {
    let mut ws = state.store.write().await;
    let channel_id = channels::create(&mut ws, user.id, body.name.trim(), body.is_public)?;
    state.persist(&ws);
    Ok(Json(ChannelCreated { channel_id }))
}

/// GET /api/channels
pub async fn list_channels(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Json<Vec<ChannelSummary>> {
    let ws = state.store.read().await;
    Json(channels::list(&ws, user.id))
}

/// GET /api/channels/all
pub async fn list_all_channels(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Json<Vec<ChannelSummary>> {
    let ws = state.store.read().await;
    Json(channels::list_all(&ws))
}

/// GET /api/channels/:channelId
pub async fn channel_details(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(channel_id): Path<ChannelId>,
) -> Result<Json<ChannelDetails>, ApiError> {
    let ws = state.store.read().await;
    Ok(Json(channels::details(&ws, user.id, channel_id)?))
}

/// POST /api/channels/:channelId/join
pub async fn join_channel(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(channel_id): Path<ChannelId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    channels::join(&mut ws, user.id, channel_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// POST /api/channels/:channelId/invite
pub async fn invite_to_channel(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(channel_id): Path<ChannelId>,
    Json(body): Json<MemberRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    channels::invite(&mut ws, user.id, channel_id, body.user_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// POST /api/channels/:channelId/leave
pub async fn leave_channel(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(channel_id): Path<ChannelId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    channels::leave(&mut ws, user.id, channel_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// POST /api/channels/:channelId/owners
pub async fn add_owner(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(channel_id): Path<ChannelId>,
    Json(body): Json<MemberRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    channels::add_owner(&mut ws, user.id, channel_id, body.user_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// DELETE /api/channels/:channelId/owners/:userId
pub async fn remove_owner(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((channel_id, target_id)): Path<(ChannelId, UserId)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    channels::remove_owner(&mut ws, user.id, channel_id, target_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}
