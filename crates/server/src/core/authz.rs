use crate::error::{ApiError, ApiResult};
use crate::store::{ContainerRef, MessageId, PermissionLevel, UserId, Workspace};

/// What an operation needs on a channel or DM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    View,
    Post,
    /// Edit/remove others' content, pin/unpin, manage owners.
    Moderate,
}

pub fn is_global_owner(ws: &Workspace, user_id: UserId) -> bool {
    ws.user(user_id)
        .is_some_and(|u| u.permission_level == PermissionLevel::Owner)
}

pub fn require_global_admin(ws: &Workspace, actor: UserId) -> ApiResult<()> {
    if is_global_owner(ws, actor) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Global owner permissions required"))
    }
}

/// Decide whether `actor` may act on a channel or DM at `level`.
///
/// Existence is checked before membership, so unknown containers surface
/// as input errors rather than leaking through access checks. Global
/// owners moderate channels they belong to; DMs have no such override.
/// Joining is a separate rule (see `channels::join`), not a View check.
pub fn authorize_container(
    ws: &Workspace,
    actor: UserId,
    container: ContainerRef,
    level: AccessLevel,
) -> ApiResult<()> {
    let (members, owners, is_dm) = match container {
        ContainerRef::Channel(id) => {
            let channel = ws
                .channel(id)
                .ok_or_else(|| ApiError::input("Channel does not exist"))?;
            (&channel.member_ids, &channel.owner_ids, false)
        }
        ContainerRef::Dm(id) => {
            let dm = ws.dm(id).ok_or_else(|| ApiError::input("DM does not exist"))?;
            (&dm.member_ids, &dm.owner_ids, true)
        }
    };

    match level {
        AccessLevel::View | AccessLevel::Post => {
            if members.contains(&actor) {
                Ok(())
            } else {
                Err(ApiError::forbidden("Not a member"))
            }
        }
        AccessLevel::Moderate => {
            if owners.contains(&actor) {
                return Ok(());
            }
            if !is_dm && members.contains(&actor) && is_global_owner(ws, actor) {
                return Ok(());
            }
            Err(ApiError::forbidden("Owner permissions required"))
        }
    }
}

/// Edit/remove rights on one message: its author, or whoever holds
/// Moderate on the containing resource. Returns the container so callers
/// don't resolve the id twice.
pub fn authorize_message_moderate(
    ws: &Workspace,
    actor: UserId,
    message_id: MessageId,
) -> ApiResult<ContainerRef> {
    let (container, message) = ws
        .find_message(message_id)
        .ok_or_else(|| ApiError::input("Message does not exist"))?;
    if message.author_id == actor {
        return Ok(container);
    }
    authorize_container(ws, actor, container, AccessLevel::Moderate)?;
    Ok(container)
}
