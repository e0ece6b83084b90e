use serde::{Deserialize, Serialize};

use crate::store::{ChannelId, DmId, Message, MessageId, UserId};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactView {
    pub react_id: i64,
    pub user_ids: Vec<UserId>,
    pub is_this_user_reacted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: MessageId,
    pub author_id: UserId,
    pub body: String,
    pub time_sent: i64,
    pub reacts: Vec<ReactView>,
    pub is_pinned: bool,
}

impl MessageView {
    /// React state is computed fresh for the viewer, never stored.
    pub fn for_viewer(message: &Message, viewer: UserId) -> Self {
        Self {
            id: message.id,
            author_id: message.author_id,
            body: message.body.clone(),
            time_sent: message.time_sent,
            reacts: message
                .reacts
                .iter()
                .map(|r| ReactView {
                    react_id: r.react_id,
                    user_ids: r.user_ids.clone(),
                    is_this_user_reacted: r.user_ids.contains(&viewer),
                })
                .collect(),
            is_pinned: message.is_pinned,
        }
    }
}

/// One page of a container's newest-first sequence. `end` is -1 once the
/// page reaches the oldest message, otherwise the next `start` to request.
#[derive(Debug, Serialize)]
pub struct MessageWindow {
    pub messages: Vec<MessageView>,
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendLaterRequest {
    pub body: String,
    pub time_sent: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreated {
    pub message_id: MessageId,
}

#[derive(Debug, Deserialize)]
pub struct EditMessageRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    pub react_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// Extra text appended to the shared copy; may be omitted.
    pub body: Option<String>,
    pub channel_id: Option<ChannelId>,
    pub dm_id: Option<DmId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageShared {
    pub shared_message_id: MessageId,
}

#[derive(Debug, Deserialize)]
pub struct StartQuery {
    pub start: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub channel_id: Option<ChannelId>,
    pub dm_id: Option<DmId>,
    pub message: String,
}
