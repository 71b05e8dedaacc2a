//! Session-wide "which paper is selected" state.
//!
//! A [`SelectionProvider`] owns the value for the lifetime of a session and
//! hands out [`SelectionHandle`]s to whichever components need to read or
//! write it. Readers that want to react to changes subscribe to a `watch`
//! channel instead of polling.
//!
//! Handles do not keep the provider alive. Touching a handle after its
//! provider has been dropped is an integration bug and panics immediately.

use std::sync::{Arc, Weak};

use tokio::sync::watch;

use crate::model::PaperId;

const OUT_OF_SCOPE: &str = "SelectionHandle used outside of its SelectionProvider scope";

type Slot = watch::Sender<Option<PaperId>>;

/// Owner of the selected paper id.
pub struct SelectionProvider {
    slot: Arc<Slot>,
}

impl SelectionProvider {
    pub fn new() -> Self {
        Self::with_initial(None)
    }

    pub fn with_initial(paper_id: Option<PaperId>) -> Self {
        let (tx, _rx) = watch::channel(paper_id);
        Self { slot: Arc::new(tx) }
    }

    pub fn handle(&self) -> SelectionHandle {
        SelectionHandle {
            slot: Arc::downgrade(&self.slot),
        }
    }
}

impl Default for SelectionProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Read/write access to the selection, valid while its provider lives.
#[derive(Clone)]
pub struct SelectionHandle {
    slot: Weak<Slot>,
}

impl SelectionHandle {
    fn slot(&self) -> Arc<Slot> {
        match self.slot.upgrade() {
            Some(slot) => slot,
            None => panic!("{OUT_OF_SCOPE}"),
        }
    }

    /// Currently selected paper, if any.
    pub fn get(&self) -> Option<PaperId> {
        self.slot().borrow().clone()
    }

    /// Replace the selection. Subscribers are woken even when the new value
    /// equals the old one, so re-selecting a paper reloads it.
    pub fn set(&self, paper_id: Option<PaperId>) {
        tracing::debug!(paper_id = ?paper_id, "selection changed");
        self.slot().send_replace(paper_id);
    }

    /// Subscribe to selection changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<PaperId>> {
        self.slot().subscribe()
    }

    /// Whether the owning provider is still alive.
    pub fn in_scope(&self) -> bool {
        self.slot.strong_count() > 0
    }
}
