use streams_shared::validation;

use crate::core::authz::{self, AccessLevel};
use crate::core::notifications;
use crate::error::{ApiError, ApiResult};
use crate::models::{ChannelDetails, ChannelSummary, UserProfile};
use crate::store::{Channel, ChannelId, ContainerRef, UserId, Workspace};

/// Create a channel; the creator becomes its sole owner and member.
pub fn create(ws: &mut Workspace, actor: UserId, name: &str, is_public: bool) -> ApiResult<ChannelId> {
    validation::validate_channel_name(name)?;
    let id = ws.alloc_channel_id();
    ws.channels.insert(
        id,
        Channel {
            id,
            name: name.to_string(),
            is_public,
            owner_ids: vec![actor],
            member_ids: vec![actor],
            messages: Vec::new(),
        },
    );
    Ok(id)
}

/// Channels the actor belongs to.
pub fn list(ws: &Workspace, actor: UserId) -> Vec<ChannelSummary> {
    ws.channels
        .values()
        .filter(|c| c.member_ids.contains(&actor))
        .map(|c| ChannelSummary {
            id: c.id,
            name: c.name.clone(),
        })
        .collect()
}

/// Every channel in the workspace, public and private alike.
pub fn list_all(ws: &Workspace) -> Vec<ChannelSummary> {
    ws.channels
        .values()
        .map(|c| ChannelSummary {
            id: c.id,
            name: c.name.clone(),
        })
        .collect()
}

pub fn details(ws: &Workspace, actor: UserId, channel_id: ChannelId) -> ApiResult<ChannelDetails> {
    authz::authorize_container(ws, actor, ContainerRef::Channel(channel_id), AccessLevel::View)?;
    let channel = ws
        .channel(channel_id)
        .ok_or_else(|| ApiError::input("Channel does not exist"))?;
    Ok(ChannelDetails {
        name: channel.name.clone(),
        is_public: channel.is_public,
        owner_members: profiles(ws, &channel.owner_ids),
        all_members: profiles(ws, &channel.member_ids),
    })
}

fn profiles(ws: &Workspace, ids: &[UserId]) -> Vec<UserProfile> {
    ids.iter()
        .filter_map(|id| ws.user(*id))
        .map(UserProfile::from)
        .collect()
}

/// Joining is its own rule, not a View check: public channels admit
/// anyone, private channels admit only global owners.
pub fn join(ws: &mut Workspace, actor: UserId, channel_id: ChannelId) -> ApiResult<()> {
    let is_admin = authz::is_global_owner(ws, actor);
    let channel = ws
        .channel(channel_id)
        .ok_or_else(|| ApiError::input("Channel does not exist"))?;
    if channel.member_ids.contains(&actor) {
        return Err(ApiError::input("Already a member"));
    }
    if !channel.is_public && !is_admin {
        return Err(ApiError::forbidden("Channel is private"));
    }
    if let Some(channel) = ws.channel_mut(channel_id) {
        channel.member_ids.push(actor);
    }
    Ok(())
}

pub fn invite(ws: &mut Workspace, actor: UserId, channel_id: ChannelId, target: UserId) -> ApiResult<()> {
    authz::authorize_container(ws, actor, ContainerRef::Channel(channel_id), AccessLevel::View)?;
    if ws.user(target).is_none() {
        return Err(ApiError::input("User does not exist"));
    }
    let Some(channel) = ws.channel_mut(channel_id) else {
        return Err(ApiError::input("Channel does not exist"));
    };
    if channel.member_ids.contains(&target) {
        return Err(ApiError::input("User is already a member"));
    }
    channel.member_ids.push(target);
    notifications::notify_added(ws, actor, ContainerRef::Channel(channel_id), target);
    Ok(())
}

/// Leaving strikes the member from the owner set too. A channel may end
/// up with zero owners; it is never deleted.
pub fn leave(ws: &mut Workspace, actor: UserId, channel_id: ChannelId) -> ApiResult<()> {
    authz::authorize_container(ws, actor, ContainerRef::Channel(channel_id), AccessLevel::View)?;
    if let Some(channel) = ws.channel_mut(channel_id) {
        channel.member_ids.retain(|&m| m != actor);
        channel.owner_ids.retain(|&o| o != actor);
    }
    Ok(())
}

pub fn add_owner(ws: &mut Workspace, actor: UserId, channel_id: ChannelId, target: UserId) -> ApiResult<()> {
    authz::authorize_container(ws, actor, ContainerRef::Channel(channel_id), AccessLevel::Moderate)?;
    let Some(channel) = ws.channel_mut(channel_id) else {
        return Err(ApiError::input("Channel does not exist"));
    };
    if !channel.member_ids.contains(&target) {
        return Err(ApiError::input("User is not a member"));
    }
    if channel.owner_ids.contains(&target) {
        return Err(ApiError::input("User is already an owner"));
    }
    channel.owner_ids.push(target);
    Ok(())
}

pub fn remove_owner(ws: &mut Workspace, actor: UserId, channel_id: ChannelId, target: UserId) -> ApiResult<()> {
    authz::authorize_container(ws, actor, ContainerRef::Channel(channel_id), AccessLevel::Moderate)?;
    let Some(channel) = ws.channel_mut(channel_id) else {
        return Err(ApiError::input("Channel does not exist"));
    };
    if !channel.owner_ids.contains(&target) {
        return Err(ApiError::input("User is not an owner"));
    }
    if channel.owner_ids.len() == 1 {
        return Err(ApiError::input("Cannot remove the only owner"));
    }
    channel.owner_ids.retain(|&o| o != target);
    Ok(())
}
