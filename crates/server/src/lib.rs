pub mod config;
pub mod core;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;

use config::Config;
use store::Workspace;
use tokio::sync::RwLock;

pub struct AppState {
    /// Single shared mutable resource: every mutation, ordinary request
    /// handling and deferred-task firing alike, goes through the write
    /// lock.
    pub store: RwLock<Workspace>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, workspace: Workspace) -> Self {
        Self {
            store: RwLock::new(workspace),
            config,
        }
    }

    /// Persist the workspace snapshot after a mutation. Fire-and-forget:
    /// failures are logged, never surfaced to the caller.
    pub fn persist(&self, workspace: &Workspace) {
        if let Err(e) = store::save_snapshot(&self.config.snapshot_path, workspace) {
            tracing::warn!("Failed to persist snapshot: {}", e);
        }
    }
}
