use chrono::Utc;

use streams_shared::constants::THUMBS_UP_REACT_ID;
use streams_shared::validation;

use crate::core::authz::{self, AccessLevel};
use crate::core::notifications;
use crate::error::{ApiError, ApiResult};
use crate::models::MessageView;
use crate::store::{ContainerRef, Message, MessageId, React, UserId, Workspace};

/// Create a message at the newest-first head of a container.
pub fn send(ws: &mut Workspace, actor: UserId, container: ContainerRef, body: &str) -> ApiResult<MessageId> {
    authz::authorize_container(ws, actor, container, AccessLevel::Post)?;
    validation::validate_message_body(body)?;
    let id = ws.alloc_message_id();
    let message = Message {
        id,
        author_id: actor,
        body: body.to_string(),
        time_sent: Utc::now().timestamp(),
        reacts: Vec::new(),
        is_pinned: false,
    };
    ws.insert_message(container, message);
    bump_send_counters(ws, actor);
    notifications::notify_tagged(ws, actor, container, body);
    Ok(id)
}

/// Validate and allocate the id immediately, so errors surface at the
/// call; the insertion itself happens when the scheduler fires
/// (`scheduler::schedule_send`).
pub fn send_later(
    ws: &mut Workspace,
    actor: UserId,
    container: ContainerRef,
    body: &str,
    time_sent: i64,
) -> ApiResult<MessageId> {
    authz::authorize_container(ws, actor, container, AccessLevel::Post)?;
    validation::validate_message_body(body)?;
    if time_sent <= Utc::now().timestamp() {
        return Err(ApiError::input("Time sent must be in the future"));
    }
    Ok(ws.alloc_message_id())
}

/// Materialize a deferred send. Insertion re-establishes newest-first
/// order by timestamp, so ordinary sends issued in the interim stay
/// chronological. A send whose container was removed while pending is
/// dropped.
pub fn deliver_deferred(
    ws: &mut Workspace,
    actor: UserId,
    container: ContainerRef,
    id: MessageId,
    body: &str,
    time_sent: i64,
) {
    let message = Message {
        id,
        author_id: actor,
        body: body.to_string(),
        time_sent,
        reacts: Vec::new(),
        is_pinned: false,
    };
    if !ws.insert_message(container, message) {
        return;
    }
    bump_send_counters(ws, actor);
    notifications::notify_tagged(ws, actor, container, body);
}

fn bump_send_counters(ws: &mut Workspace, actor: UserId) {
    ws.total_messages_sent += 1;
    if let Some(user) = ws.user_mut(actor) {
        user.messages_sent += 1;
    }
}

fn discard(ws: &mut Workspace, message_id: MessageId) {
    if let Some(message) = ws.extract_message(message_id) {
        ws.removed_messages.push(message);
    }
}

/// Replace a message body in place, keeping id/author/timestamp/reacts/pin
/// state. An empty body deletes the message entirely.
pub fn edit(ws: &mut Workspace, actor: UserId, message_id: MessageId, body: &str) -> ApiResult<()> {
    let container = authz::authorize_message_moderate(ws, actor, message_id)?;
    validation::validate_edit_body(body)?;
    if body.is_empty() {
        discard(ws, message_id);
        return Ok(());
    }
    if let Some((_, message)) = ws.find_message_mut(message_id) {
        message.body = body.to_string();
    }
    notifications::notify_tagged(ws, actor, container, body);
    Ok(())
}

/// Move a message to the removed record; the id stops resolving.
pub fn remove(ws: &mut Workspace, actor: UserId, message_id: MessageId) -> ApiResult<()> {
    authz::authorize_message_moderate(ws, actor, message_id)?;
    discard(ws, message_id);
    Ok(())
}

pub fn react(ws: &mut Workspace, actor: UserId, message_id: MessageId, react_id: i64) -> ApiResult<()> {
    let (container, author_id) = {
        let (container, message) = ws
            .find_message(message_id)
            .ok_or_else(|| ApiError::input("Message does not exist"))?;
        (container, message.author_id)
    };
    authz::authorize_container(ws, actor, container, AccessLevel::View)?;
    if react_id != THUMBS_UP_REACT_ID {
        return Err(ApiError::input("Unknown react"));
    }
    let Some((_, message)) = ws.find_message_mut(message_id) else {
        return Err(ApiError::input("Message does not exist"));
    };
    if let Some(react) = message.reacts.iter_mut().find(|r| r.react_id == react_id) {
        if react.user_ids.contains(&actor) {
            return Err(ApiError::input("Already reacted"));
        }
        react.user_ids.push(actor);
    } else {
        message.reacts.push(React {
            react_id,
            user_ids: vec![actor],
        });
    }
    notifications::notify_reacted(ws, actor, container, author_id);
    Ok(())
}

pub fn unreact(ws: &mut Workspace, actor: UserId, message_id: MessageId, react_id: i64) -> ApiResult<()> {
    let container = ws
        .locate_message(message_id)
        .ok_or_else(|| ApiError::input("Message does not exist"))?;
    authz::authorize_container(ws, actor, container, AccessLevel::View)?;
    if react_id != THUMBS_UP_REACT_ID {
        return Err(ApiError::input("Unknown react"));
    }
    let Some((_, message)) = ws.find_message_mut(message_id) else {
        return Err(ApiError::input("Message does not exist"));
    };
    let Some(react) = message.reacts.iter_mut().find(|r| r.react_id == react_id) else {
        return Err(ApiError::input("No react to remove"));
    };
    if !react.user_ids.contains(&actor) {
        return Err(ApiError::input("No react to remove"));
    }
    react.user_ids.retain(|&u| u != actor);
    Ok(())
}

pub fn pin(ws: &mut Workspace, actor: UserId, message_id: MessageId) -> ApiResult<()> {
    let container = ws
        .locate_message(message_id)
        .ok_or_else(|| ApiError::input("Message does not exist"))?;
    authz::authorize_container(ws, actor, container, AccessLevel::Moderate)?;
    let Some((_, message)) = ws.find_message_mut(message_id) else {
        return Err(ApiError::input("Message does not exist"));
    };
    if message.is_pinned {
        return Err(ApiError::input("Message is already pinned"));
    }
    message.is_pinned = true;
    Ok(())
}

pub fn unpin(ws: &mut Workspace, actor: UserId, message_id: MessageId) -> ApiResult<()> {
    let container = ws
        .locate_message(message_id)
        .ok_or_else(|| ApiError::input("Message does not exist"))?;
    authz::authorize_container(ws, actor, container, AccessLevel::Moderate)?;
    let Some((_, message)) = ws.find_message_mut(message_id) else {
        return Err(ApiError::input("Message does not exist"));
    };
    if !message.is_pinned {
        return Err(ApiError::input("Message is not pinned"));
    }
    message.is_pinned = false;
    Ok(())
}

/// Copy a message into another container, appending optional extra text.
/// The original is untouched; the copy gets a fresh id and timestamp,
/// no reacts, unpinned.
pub fn share(
    ws: &mut Workspace,
    actor: UserId,
    og_message_id: MessageId,
    extra_body: &str,
    target: ContainerRef,
) -> ApiResult<MessageId> {
    let (source, og_body) = {
        let (container, message) = ws
            .find_message(og_message_id)
            .ok_or_else(|| ApiError::input("Message does not exist"))?;
        (container, message.body.clone())
    };
    authz::authorize_container(ws, actor, source, AccessLevel::View)?;
    authz::authorize_container(ws, actor, target, AccessLevel::Post)?;
    validation::validate_edit_body(extra_body)?;

    let body = format!("{og_body}{extra_body}");
    let id = ws.alloc_message_id();
    let message = Message {
        id,
        author_id: actor,
        body: body.clone(),
        time_sent: Utc::now().timestamp(),
        reacts: Vec::new(),
        is_pinned: false,
    };
    ws.insert_message(target, message);
    bump_send_counters(ws, actor);
    notifications::notify_tagged(ws, actor, target, &body);
    Ok(id)
}

/// Case-insensitive substring search across every container the caller
/// belongs to.
pub fn search(ws: &Workspace, actor: UserId, query: &str) -> ApiResult<Vec<MessageView>> {
    validation::validate_search_query(query)?;
    let needle = query.to_lowercase();
    let mut found = Vec::new();
    let channel_messages = ws
        .channels
        .values()
        .filter(|c| c.member_ids.contains(&actor))
        .map(|c| &c.messages);
    let dm_messages = ws
        .dms
        .values()
        .filter(|d| d.member_ids.contains(&actor))
        .map(|d| &d.messages);
    for messages in channel_messages.chain(dm_messages) {
        for message in messages {
            if message.body.to_lowercase().contains(&needle) {
                found.push(MessageView::for_viewer(message, actor));
            }
        }
    }
    Ok(found)
}
