//! Store change events
//!
//! Explicit observer contract for the entity store: every successful
//! mutation emits one event before the mutating call returns, so view
//! models can recompute their projections. Subscribers come and go
//! freely; emitting to zero or lagging receivers never fails a mutation.

use serde::Serialize;
use tokio::sync::broadcast;

/// Capacity of the broadcast channel. A slow subscriber past this many
/// undelivered events observes a `Lagged` error and should refetch.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A change to the entity store. Carries the id of the affected entity;
/// folder deletion also reports how many notes the cascade removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StoreEvent {
    FolderCreated { id: String },
    FolderRenamed { id: String },
    FolderDeleted { id: String, cascaded_notes: u64 },
    NoteCreated { id: String },
    NoteUpdated { id: String },
    NoteTrashed { id: String },
    NoteRestored { id: String },
    NoteDeleted { id: String },
    AttachmentCreated { id: String, note_id: String },
    AttachmentDeleted { id: String },
}

/// Broadcast hub owned by the repository
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to store changes. Events sent before this call are not
    /// replayed; new subscribers should query current state first.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to all current subscribers.
    pub fn emit(&self, event: StoreEvent) {
        // A send error just means nobody is listening
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
