//! JSON-backed persistence for the chat state

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::chat::ChatState;
use crate::Result;

/// Store for the chat state file
#[derive(Debug, Clone)]
pub struct ChatStore {
    path: PathBuf,
}

impl ChatStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the persisted state, falling back to `fresh` when the file is
    /// missing. A file that fails to parse is discarded with a warning so a
    /// corrupted transcript never wedges the application.
    pub fn load(&self, fresh: ChatState) -> ChatState {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No chat state at {}; starting fresh", self.path.display());
                return fresh;
            }
            Err(e) => {
                warn!("Failed to read chat state {}: {e}", self.path.display());
                return fresh;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => {
                debug!("Chat state loaded from {}", self.path.display());
                state
            }
            Err(e) => {
                warn!(
                    "Corrupted chat state {}; discarding: {e}",
                    self.path.display()
                );
                let _ = std::fs::remove_file(&self.path);
                fresh
            }
        }
    }

    /// Write the state out; called after every state change
    pub fn save(&self, state: &ChatState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, content)?;
        debug!("Chat state saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the state file entirely
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
