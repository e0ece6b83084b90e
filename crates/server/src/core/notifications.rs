use regex_lite::Regex;

use streams_shared::constants::{NOTIFICATION_PAGE_SIZE, NOTIFICATION_PREVIEW_LENGTH};

use crate::models::NotificationView;
use crate::store::{ContainerRef, Notification, UserId, Workspace};

/// The 20 most recent notifications for `user_id`, newest first.
pub fn get(ws: &Workspace, user_id: UserId) -> Vec<NotificationView> {
    ws.notifications
        .get(&user_id)
        .map(|list| {
            list.iter()
                .take(NOTIFICATION_PAGE_SIZE)
                .map(|n| NotificationView {
                    channel_id: n.channel_id,
                    dm_id: n.dm_id,
                    message: n.message.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn notification(container: ContainerRef, message: String) -> Notification {
    match container {
        ContainerRef::Channel(id) => Notification {
            channel_id: Some(id),
            dm_id: None,
            message,
        },
        ContainerRef::Dm(id) => Notification {
            channel_id: None,
            dm_id: Some(id),
            message,
        },
    }
}

/// Scan a freshly created or edited body for `@handle` tags and notify
/// every tagged member of the container, once per operation each.
pub fn notify_tagged(ws: &mut Workspace, actor_id: UserId, container: ContainerRef, body: &str) {
    let Some(container_name) = ws.container_name(container).map(str::to_string) else {
        return;
    };
    let Some(actor_handle) = ws.user(actor_id).map(|u| u.handle.clone()) else {
        return;
    };

    let re = Regex::new(r"@([A-Za-z0-9]+)").unwrap();
    let mut tagged: Vec<UserId> = Vec::new();
    for caps in re.captures_iter(body) {
        let Some(id) = ws.user_by_handle(&caps[1]).map(|u| u.id) else {
            continue;
        };
        if !ws.is_member(container, id) || tagged.contains(&id) {
            continue;
        }
        tagged.push(id);
    }

    let preview: String = body.chars().take(NOTIFICATION_PREVIEW_LENGTH).collect();
    for id in tagged {
        ws.push_notification(
            id,
            notification(
                container,
                format!("{actor_handle} tagged you in {container_name}: {preview}"),
            ),
        );
    }
}

/// Tell the author their message was reacted to, if they are still in the
/// container.
pub fn notify_reacted(
    ws: &mut Workspace,
    reactor_id: UserId,
    container: ContainerRef,
    author_id: UserId,
) {
    if !ws.is_member(container, author_id) {
        return;
    }
    let Some(container_name) = ws.container_name(container).map(str::to_string) else {
        return;
    };
    let Some(reactor_handle) = ws.user(reactor_id).map(|u| u.handle.clone()) else {
        return;
    };
    ws.push_notification(
        author_id,
        notification(
            container,
            format!("{reactor_handle} reacted to your message in {container_name}"),
        ),
    );
}

/// Tell a user they were added to a channel or DM.
pub fn notify_added(ws: &mut Workspace, actor_id: UserId, container: ContainerRef, target_id: UserId) {
    let Some(container_name) = ws.container_name(container).map(str::to_string) else {
        return;
    };
    let Some(actor_handle) = ws.user(actor_id).map(|u| u.handle.clone()) else {
        return;
    };
    ws.push_notification(
        target_id,
        notification(
            container,
            format!("{actor_handle} added you to {container_name}"),
        ),
    );
}
