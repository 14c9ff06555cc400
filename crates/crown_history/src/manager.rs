//! Bounded linear history with an availability observer.

use std::collections::VecDeque;

use crate::action::Action;

/// Availability callback, invoked with `(undo_available, redo_available)`
/// after every state transition.
pub type StateObserver = Box<dyn FnMut(bool, bool)>;

/// Owns the committed actions for one document and the cursor separating
/// applied changes from redoable ones.
///
/// The history is strictly linear: committing a new action discards any
/// actions that were undone but not redone. All operations run
/// synchronously on the calling thread; the observer executes inline
/// within the triggering call and must not call back into the same
/// manager.
pub struct HistoryManager<D> {
    actions: VecDeque<Box<dyn Action<D>>>,
    cursor: usize,
    capacity: usize,
    observer: Option<StateObserver>,
}

impl<D> HistoryManager<D> {
    /// Default maximum number of retained actions.
    pub const DEFAULT_CAPACITY: usize = 500;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actions: VecDeque::new(),
            cursor: 0,
            capacity,
            observer: None,
        }
    }

    /// Install the availability callback.
    ///
    /// Single slot, last registration wins. The callback is not invoked
    /// until the next state transition.
    pub fn set_observer(&mut self, observer: impl FnMut(bool, bool) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Drop all history, e.g. when switching documents.
    pub fn reset(&mut self) {
        self.actions.clear();
        self.cursor = 0;

        self.notify();
    }

    /// Commit an action whose change has already been applied to the
    /// document.
    ///
    /// Any redoable tail is discarded first; when the capacity bound is
    /// exceeded the oldest applied action is evicted.
    pub fn add(&mut self, action: Box<dyn Action<D>>) {
        self.actions.truncate(self.cursor);

        self.actions.push_back(action);

        self.cursor += 1;

        if self.actions.len() > self.capacity {
            self.cursor -= 1;
            self.actions.pop_front();
            log::debug!("history full, evicted the oldest action");
        }

        self.notify();

        debug_assert!(self.actions.len() <= self.capacity);
    }

    pub fn is_undo_available(&self) -> bool {
        self.cursor > 0
    }

    pub fn is_redo_available(&self) -> bool {
        self.cursor < self.actions.len()
    }

    /// Revert the latest applied action.
    ///
    /// Returns `false` when nothing is undoable; that case changes no
    /// state and fires no observer. An action that itself reports failure
    /// still moves the cursor: the manager trusts the action's own
    /// bookkeeping and does not compensate.
    pub fn undo(&mut self, doc: &mut D) -> bool {
        if !self.is_undo_available() {
            return false;
        }

        self.cursor -= 1;
        let result = self.actions[self.cursor].undo(doc);
        if !result {
            log::warn!("undo reported failure at history index {}", self.cursor);
        }

        self.notify();

        result
    }

    /// Re-apply the next undone action.
    ///
    /// Returns `false` when nothing is redoable; that case changes no
    /// state and fires no observer. A failing action still moves the
    /// cursor, mirroring [`undo`](Self::undo).
    pub fn redo(&mut self, doc: &mut D) -> bool {
        if !self.is_redo_available() {
            return false;
        }

        let result = self.actions[self.cursor].redo(doc);
        if !result {
            log::warn!("redo reported failure at history index {}", self.cursor);
        }
        self.cursor += 1;

        self.notify();

        result
    }

    /// Get the number of retained actions, applied plus redoable.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the history holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Get the retention bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of applied actions the cursor can walk back over.
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    /// Get the number of undone actions still eligible for redo.
    pub fn redo_count(&self) -> usize {
        self.actions.len() - self.cursor
    }

    fn notify(&mut self) {
        let undo_available = self.is_undo_available();
        let redo_available = self.is_redo_available();

        if let Some(observer) = self.observer.as_mut() {
            observer(undo_available, redo_available);
        }
    }
}

impl<D> Default for HistoryManager<D> {
    fn default() -> Self {
        Self::new()
    }
}
