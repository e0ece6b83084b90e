use std::fs;
use std::io;
use std::path::Path;

use super::Workspace;

/// Serialize the whole workspace as one opaque JSON snapshot.
pub fn save_snapshot(path: &str, workspace: &Workspace) -> io::Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).ok();
    }
    let bytes = serde_json::to_vec(workspace).map_err(io::Error::other)?;
    fs::write(path, bytes)
}

/// Reload the snapshot written by [`save_snapshot`]. A missing file yields
/// a fresh workspace.
pub fn load_snapshot(path: &str) -> io::Result<Workspace> {
    match fs::read(path) {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(io::Error::other),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Workspace::new()),
        Err(e) => Err(e),
    }
}
