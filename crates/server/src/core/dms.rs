use crate::core::authz::{self, AccessLevel};
use crate::core::notifications;
use crate::error::{ApiError, ApiResult};
use crate::models::{DmDetails, DmSummary, UserProfile};
use crate::store::{ContainerRef, Dm, DmId, UserId, Workspace};

/// Create a DM with the given other members. The name is frozen at
/// creation from the sorted handles of everyone in it.
pub fn create(ws: &mut Workspace, actor: UserId, invited: &[UserId]) -> ApiResult<DmId> {
    if invited.contains(&actor) {
        return Err(ApiError::input("Cannot include yourself"));
    }
    let mut deduped = invited.to_vec();
    deduped.sort_unstable();
    deduped.dedup();
    if deduped.len() != invited.len() {
        return Err(ApiError::input("Duplicate user ids"));
    }
    for id in invited {
        if ws.user(*id).is_none() {
            return Err(ApiError::input("User does not exist"));
        }
    }

    let mut member_ids = vec![actor];
    member_ids.extend_from_slice(invited);
    let mut handles: Vec<String> = member_ids
        .iter()
        .filter_map(|id| ws.user(*id))
        .map(|u| u.handle.clone())
        .collect();
    handles.sort();
    let name = handles.join(", ");

    let id = ws.alloc_dm_id();
    ws.dms.insert(
        id,
        Dm {
            id,
            name,
            owner_ids: vec![actor],
            member_ids,
            messages: Vec::new(),
        },
    );
    for target in invited {
        notifications::notify_added(ws, actor, ContainerRef::Dm(id), *target);
    }
    Ok(id)
}

/// DMs the actor belongs to.
pub fn list(ws: &Workspace, actor: UserId) -> Vec<DmSummary> {
    ws.dms
        .values()
        .filter(|d| d.member_ids.contains(&actor))
        .map(|d| DmSummary {
            id: d.id,
            name: d.name.clone(),
        })
        .collect()
}

pub fn details(ws: &Workspace, actor: UserId, dm_id: DmId) -> ApiResult<DmDetails> {
    authz::authorize_container(ws, actor, ContainerRef::Dm(dm_id), AccessLevel::View)?;
    let dm = ws.dm(dm_id).ok_or_else(|| ApiError::input("DM does not exist"))?;
    Ok(DmDetails {
        name: dm.name.clone(),
        members: dm
            .member_ids
            .iter()
            .filter_map(|id| ws.user(*id))
            .map(UserProfile::from)
            .collect(),
    })
}

/// Leaving strikes the member from the owner set too. An emptied DM is
/// kept around; only an explicit remove deletes it.
pub fn leave(ws: &mut Workspace, actor: UserId, dm_id: DmId) -> ApiResult<()> {
    authz::authorize_container(ws, actor, ContainerRef::Dm(dm_id), AccessLevel::View)?;
    if let Some(dm) = ws.dm_mut(dm_id) {
        dm.member_ids.retain(|&m| m != actor);
        dm.owner_ids.retain(|&o| o != actor);
    }
    Ok(())
}

/// Destroy a DM: its messages move to the removed record, membership is
/// cleared, and the DM itself is retained only as a removed record.
/// Irreversible, and distinct from leave.
pub fn remove(ws: &mut Workspace, actor: UserId, dm_id: DmId) -> ApiResult<()> {
    let dm = ws.dm(dm_id).ok_or_else(|| ApiError::input("DM does not exist"))?;
    if !dm.owner_ids.contains(&actor) {
        return Err(ApiError::forbidden("Only the DM owner can remove it"));
    }
    let Some(mut dm) = ws.detach_dm(dm_id) else {
        return Err(ApiError::input("DM does not exist"));
    };
    ws.removed_messages.append(&mut dm.messages);
    dm.member_ids.clear();
    dm.owner_ids.clear();
    ws.removed_dms.push(dm);
    Ok(())
}
