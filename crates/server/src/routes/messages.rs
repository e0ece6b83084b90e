use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::{messages, pagination, scheduler};
use crate::error::ApiError;
use crate::models::{
    AuthUser, EditMessageRequest, MessageCreated, MessageShared, MessageWindow, ReactRequest,
    SendLaterRequest, SendMessageRequest, ShareRequest, StartQuery,
};
use crate::store::{ChannelId, ContainerRef, DmId, MessageId};
use crate::AppState;

/// GET /api/channels/:channelId/messages?start=N
pub async fn list_channel_messages(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(channel_id): Path<ChannelId>,
    Query(query): Query<StartQuery>,
) -> Result<Json<MessageWindow>, ApiError> {
    let ws = state.store.read().await;
    let window = pagination::list_messages(
        &ws,
        user.id,
        ContainerRef::Channel(channel_id),
        query.start.unwrap_or(0),
    )?;
    Ok(Json(window))
}

/// GET /api/dms/:dmId/messages?start=N
pub async fn list_dm_messages(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(dm_id): Path<DmId>,
    Query(query): Query<StartQuery>,
) -> Result<Json<MessageWindow>, ApiError> {
    let ws = state.store.read().await;
    let window = pagination::list_messages(
        &ws,
        user.id,
        ContainerRef::Dm(dm_id),
        query.start.unwrap_or(0),
    )?;
    Ok(Json(window))
}

/// POST /api/channels/:channelId/messages
pub async fn send_channel_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(channel_id): Path<ChannelId>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<MessageCreated>, ApiError> {
    let mut ws = state.store.write().await;
    let message_id = messages::send(&mut ws, user.id, ContainerRef::Channel(channel_id), &body.body)?;
    state.persist(&ws);
    Ok(Json(MessageCreated { message_id }))
}

/// POST /api/dms/:dmId/messages
pub async fn send_dm_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(dm_id): Path<DmId>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<MessageCreated>, ApiError> {
    let mut ws = state.store.write().await;
    let message_id = messages::send(&mut ws, user.id, ContainerRef::Dm(dm_id), &body.body)?;
    state.persist(&ws);
    Ok(Json(MessageCreated { message_id }))
}

/// POST /api/channels/:channelId/messages/later
pub async fn send_channel_message_later(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(channel_id): Path<ChannelId>,
    Json(body): Json<SendLaterRequest>,
) -> Result<Json<MessageCreated>, ApiError> {
    send_later(state, user, ContainerRef::Channel(channel_id), body).await
}

/// POST /api/dms/:dmId/messages/later
pub async fn send_dm_message_later(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(dm_id): Path<DmId>,
    Json(body): Json<SendLaterRequest>,
) -> Result<Json<MessageCreated>, ApiError> {
    send_later(state, user, ContainerRef::Dm(dm_id), body).await
}

async fn send_later(
    state: Arc<AppState>,
    user: AuthUser,
    container: ContainerRef,
    body: SendLaterRequest,
) -> Result<Json<MessageCreated>, ApiError> {
    let message_id = {
        let mut ws = state.store.write().await;
        let id = messages::send_later(&mut ws, user.id, container, &body.body, body.time_sent)?;
        state.persist(&ws);
        id
    };
    scheduler::schedule_send(
        state,
        user.id,
        container,
        message_id,
        body.body,
        body.time_sent,
    );
    Ok(Json(MessageCreated { message_id }))
}

/// PATCH /api/messages/:messageId
pub async fn edit_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(message_id): Path<MessageId>,
    Json(body): Json<EditMessageRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    messages::edit(&mut ws, user.id, message_id, &body.body)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// DELETE /api/messages/:messageId
pub async fn remove_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(message_id): Path<MessageId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    messages::remove(&mut ws, user.id, message_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// POST /api/messages/:messageId/react
pub async fn react_to_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(message_id): Path<MessageId>,
    Json(body): Json<ReactRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    messages::react(&mut ws, user.id, message_id, body.react_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// POST /api/messages/:messageId/unreact
pub async fn unreact_to_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(message_id): Path<MessageId>,
    Json(body): Json<ReactRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    messages::unreact(&mut ws, user.id, message_id, body.react_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// POST /api/messages/:messageId/pin
pub async fn pin_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(message_id): Path<MessageId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    messages::pin(&mut ws, user.id, message_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// POST /api/messages/:messageId/unpin
pub async fn unpin_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(message_id): Path<MessageId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut ws = state.store.write().await;
    messages::unpin(&mut ws, user.id, message_id)?;
    state.persist(&ws);
    Ok(Json(serde_json::json!({})))
}

/// POST /api/messages/:messageId/share
pub async fn share_message(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(message_id): Path<MessageId>,
    Json(body): Json<ShareRequest>,
) -> Result<Json<MessageShared>, ApiError> {
    let target = match (body.channel_id, body.dm_id) {
        (Some(channel_id), None) => ContainerRef::Channel(channel_id),
        (None, Some(dm_id)) => ContainerRef::Dm(dm_id),
        _ => return Err(ApiError::input("Exactly one target container is required")),
    };
    let extra = body.body.as_deref().unwrap_or("");

    let mut ws = state.store.write().await;
    let shared_message_id = messages::share(&mut ws, user.id, message_id, extra, target)?;
    state.persist(&ws);
    Ok(Json(MessageShared { shared_message_id }))
}
