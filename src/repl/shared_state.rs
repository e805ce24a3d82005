use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::command::CommandNode;

/// Command tree shared between the completer and the dispatcher.
///
/// Completion reads it on every keystroke, dispatch writes it once per
/// submitted line. Both happen on the input loop's thread.
#[derive(Debug, Clone)]
pub struct SharedTree {
    root: Arc<RwLock<CommandNode>>,
}

impl SharedTree {
    pub fn new(root: CommandNode) -> Self {
        Self {
            root: Arc::new(RwLock::new(root)),
        }
    }

    /// Read access for completion.
    ///
    /// A lock poisoned by a panicking action is recovered; the tree is
    /// reset before every dispatch anyway.
    pub fn read(&self) -> RwLockReadGuard<'_, CommandNode> {
        self.root.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access for dispatch.
    pub fn write(&self) -> RwLockWriteGuard<'_, CommandNode> {
        self.root.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Source of the prompt text.
///
/// Clones share the same text, so a command action holding a clone can
/// change the prompt shown for the next line.
#[derive(Debug, Clone)]
pub struct PrefixProvider {
    prefix: Arc<RwLock<String>>,
}

impl PrefixProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Arc::new(RwLock::new(prefix.into())),
        }
    }

    /// Current prompt text, and whether it must be queried again before
    /// each line. Always live.
    pub fn get_prefix(&self) -> (String, bool) {
        let prefix = self.prefix.read().unwrap_or_else(PoisonError::into_inner);
        (prefix.clone(), true)
    }

    /// Replace the prompt text; takes effect on the next redraw.
    pub fn set_prompt_prefix(&self, prefix: impl Into<String>) {
        *self.prefix.write().unwrap_or_else(PoisonError::into_inner) = prefix.into();
    }
}

impl Default for PrefixProvider {
    fn default() -> Self {
        Self::new("> ")
    }
}
