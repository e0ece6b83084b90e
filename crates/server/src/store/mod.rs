mod snapshot;

pub use snapshot::{load_snapshot, save_snapshot};

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type ChannelId = i64;
pub type DmId = i64;
pub type MessageId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Owner,
    Member,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub name_first: String,
    pub name_last: String,
    pub handle: String,
    pub permission_level: PermissionLevel,
    pub profile_image_url: Option<String>,
    pub session_ids: Vec<String>,
    pub messages_sent: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct React {
    pub react_id: i64,
    pub user_ids: Vec<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author_id: UserId,
    pub body: String,
    pub time_sent: i64,
    pub reacts: Vec<React>,
    pub is_pinned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub is_public: bool,
    /// Always a subset of `member_ids`.
    pub owner_ids: Vec<UserId>,
    pub member_ids: Vec<UserId>,
    /// Newest-first.
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dm {
    pub id: DmId,
    /// Frozen at creation from the sorted handles of the founding members.
    pub name: String,
    pub owner_ids: Vec<UserId>,
    pub member_ids: Vec<UserId>,
    /// Newest-first.
    pub messages: Vec<Message>,
}

/// What survives of a removed user: the id stays resolvable for message
/// attribution, everything else is redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedUser {
    pub id: UserId,
    pub name_first: String,
    pub name_last: String,
}

/// A channel or DM: anything that owns a message sequence and a
/// membership set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerRef {
    Channel(ChannelId),
    Dm(DmId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub channel_id: Option<ChannelId>,
    pub dm_id: Option<DmId>,
    pub message: String,
}

/// The authoritative in-memory state of the whole workspace. Channels and
/// DMs hold only user ids, and messages only an author id, so removal is
/// reference deletion rather than graph surgery.
#[derive(Debug, Serialize, Deserialize)]
pub struct Workspace {
    pub users: BTreeMap<UserId, User>,
    pub channels: BTreeMap<ChannelId, Channel>,
    pub dms: BTreeMap<DmId, Dm>,
    pub removed_users: Vec<RemovedUser>,
    pub removed_messages: Vec<Message>,
    pub removed_dms: Vec<Dm>,
    pub sessions: HashMap<String, Session>,
    /// Per-user, newest-first.
    pub notifications: HashMap<UserId, Vec<Notification>>,
    pub total_messages_sent: u64,
    /// Message ids are workspace-global, so addressing one is an index
    /// lookup rather than a scan over every container.
    message_index: HashMap<MessageId, ContainerRef>,
    next_user_id: UserId,
    next_channel_id: ChannelId,
    next_dm_id: DmId,
    next_message_id: MessageId,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            channels: BTreeMap::new(),
            dms: BTreeMap::new(),
            removed_users: Vec::new(),
            removed_messages: Vec::new(),
            removed_dms: Vec::new(),
            sessions: HashMap::new(),
            notifications: HashMap::new(),
            total_messages_sent: 0,
            message_index: HashMap::new(),
            next_user_id: 1,
            next_channel_id: 1,
            next_dm_id: 1,
            next_message_id: 1,
        }
    }

    pub fn alloc_user_id(&mut self) -> UserId {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id
    }

    pub fn alloc_channel_id(&mut self) -> ChannelId {
        let id = self.next_channel_id;
        self.next_channel_id += 1;
        id
    }

    pub fn alloc_dm_id(&mut self) -> DmId {
        let id = self.next_dm_id;
        self.next_dm_id += 1;
        id
    }

    pub fn alloc_message_id(&mut self) -> MessageId {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }

    pub fn user_by_handle(&self, handle: &str) -> Option<&User> {
        self.users.values().find(|u| u.handle == handle)
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.users.values().any(|u| u.email == email)
    }

    pub fn handle_taken(&self, handle: &str) -> bool {
        self.users.values().any(|u| u.handle == handle)
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.channels.get_mut(&id)
    }

    pub fn dm(&self, id: DmId) -> Option<&Dm> {
        self.dms.get(&id)
    }

    pub fn dm_mut(&mut self, id: DmId) -> Option<&mut Dm> {
        self.dms.get_mut(&id)
    }

    pub fn container_name(&self, container: ContainerRef) -> Option<&str> {
        match container {
            ContainerRef::Channel(id) => self.channels.get(&id).map(|c| c.name.as_str()),
            ContainerRef::Dm(id) => self.dms.get(&id).map(|d| d.name.as_str()),
        }
    }

    pub fn container_members(&self, container: ContainerRef) -> Option<&[UserId]> {
        match container {
            ContainerRef::Channel(id) => self.channels.get(&id).map(|c| c.member_ids.as_slice()),
            ContainerRef::Dm(id) => self.dms.get(&id).map(|d| d.member_ids.as_slice()),
        }
    }

    pub fn container_messages(&self, container: ContainerRef) -> Option<&[Message]> {
        match container {
            ContainerRef::Channel(id) => self.channels.get(&id).map(|c| c.messages.as_slice()),
            ContainerRef::Dm(id) => self.dms.get(&id).map(|d| d.messages.as_slice()),
        }
    }

    fn container_messages_mut(&mut self, container: ContainerRef) -> Option<&mut Vec<Message>> {
        match container {
            ContainerRef::Channel(id) => self.channels.get_mut(&id).map(|c| &mut c.messages),
            ContainerRef::Dm(id) => self.dms.get_mut(&id).map(|d| &mut d.messages),
        }
    }

    pub fn is_member(&self, container: ContainerRef, user_id: UserId) -> bool {
        self.container_members(container)
            .is_some_and(|members| members.contains(&user_id))
    }

    pub fn locate_message(&self, id: MessageId) -> Option<ContainerRef> {
        self.message_index.get(&id).copied()
    }

    pub fn find_message(&self, id: MessageId) -> Option<(ContainerRef, &Message)> {
        let container = self.locate_message(id)?;
        let messages = self.container_messages(container)?;
        messages.iter().find(|m| m.id == id).map(|m| (container, m))
    }

    pub fn find_message_mut(&mut self, id: MessageId) -> Option<(ContainerRef, &mut Message)> {
        let container = self.locate_message(id)?;
        let messages = self.container_messages_mut(container)?;
        messages
            .iter_mut()
            .find(|m| m.id == id)
            .map(|m| (container, m))
    }

    /// Insert into the container's newest-first sequence by timestamp
    /// comparison, not blind prepend, so a deferred send materializing
    /// late still lands in chronological position. Returns false if the
    /// container no longer exists.
    pub fn insert_message(&mut self, container: ContainerRef, message: Message) -> bool {
        let id = message.id;
        let Some(messages) = self.container_messages_mut(container) else {
            return false;
        };
        let at = messages
            .iter()
            .position(|m| m.time_sent <= message.time_sent)
            .unwrap_or(messages.len());
        messages.insert(at, message);
        self.message_index.insert(id, container);
        true
    }

    /// Detach a message from its container, dropping its index entry.
    /// Further lookups of the id fail.
    pub fn extract_message(&mut self, id: MessageId) -> Option<Message> {
        let container = self.message_index.remove(&id)?;
        let messages = self.container_messages_mut(container)?;
        let at = messages.iter().position(|m| m.id == id)?;
        Some(messages.remove(at))
    }

    /// Detach a whole DM; index entries for its messages are dropped.
    pub fn detach_dm(&mut self, id: DmId) -> Option<Dm> {
        let dm = self.dms.remove(&id)?;
        for message in &dm.messages {
            self.message_index.remove(&message.id);
        }
        Some(dm)
    }

    pub fn push_notification(&mut self, user_id: UserId, notification: Notification) {
        self.notifications
            .entry(user_id)
            .or_default()
            .insert(0, notification);
    }

    pub fn live_message_count(&self) -> usize {
        self.channels.values().map(|c| c.messages.len()).sum::<usize>()
            + self.dms.values().map(|d| d.messages.len()).sum::<usize>()
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
