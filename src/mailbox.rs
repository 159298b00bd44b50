//! Single-slot pending-command store
//!
//! Devices that sit behind NAT cannot receive pushed commands, so they
//! poll `/nextCommand` instead. The mailbox holds at most one unconsumed
//! command: a write overwrites any unread value (last-write-wins) and a
//! poll returns-and-clears in one step. A rapid second command entirely
//! supersedes the first; nothing queues, nothing persists.

use std::sync::Mutex;

/// Single-slot, overwrite-on-write, clear-on-read command store.
#[derive(Debug, Default)]
pub struct Mailbox {
    // Never held across an await point; a std mutex keeps both
    // operations atomic under the multi-threaded runtime.
    slot: Mutex<Option<String>>,
}

impl Mailbox {
    /// Create an empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a command, overwriting any unread value.
    pub fn set(&self, token: impl Into<String>) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    /// Return the held command and clear the slot in the same operation.
    pub fn take(&self) -> Option<String> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.take()
    }
}
