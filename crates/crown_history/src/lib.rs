//! # crown_history - Bounded Undo/Redo History
//!
//! Every undoable change to an editor document goes through this crate:
//! concrete mutations implement [`Action`], a [`HistoryManager`] owns the
//! committed actions behind a capacity bound, and [`ActionCreator`]
//! brackets a mutation with capture-before / commit-or-revert-after
//! semantics.
//!
//! The history is linear. Committing a new action invalidates anything
//! that was undone but not redone; there is no branching and no redo
//! tree. A registered observer is told after every transition whether
//! undo and redo are currently available, which is what menu items and
//! toolbar buttons key off.
//!
//! History is memory-resident only and is discarded with its manager.
//! A manager and its actions belong to a single thread.

mod action;
mod creator;
mod manager;
mod snapshot;

pub use action::{Action, CompositeAction, FnAction};
pub use creator::ActionCreator;
pub use manager::{HistoryManager, StateObserver};
pub use snapshot::SnapshotAction;

use thiserror::Error;

/// Errors from snapshot capture.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The document could not be encoded for snapshot capture.
    #[error("failed to encode document snapshot: {0}")]
    Encode(#[from] bincode::Error),
}
