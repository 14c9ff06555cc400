//! The reversible-change contract and generic action adapters.

use core::marker::PhantomData;

/// A reversible unit of document mutation.
///
/// `redo` and `undo` must be inverses on observable document content:
/// applying one after the other leaves the document as it was. Either may
/// report `false` when the document is not in the shape the action
/// expects (for example, something mutated it behind the history's back);
/// the [`HistoryManager`](crate::HistoryManager) propagates the result to
/// the caller without attempting recovery.
pub trait Action<D> {
    /// Re-apply a previously undone change.
    fn redo(&mut self, doc: &mut D) -> bool;

    /// Reverse the change.
    fn undo(&mut self, doc: &mut D) -> bool;
}

/// An action built from a closure pair.
///
/// Handy for one-off mutations that do not warrant a named action type.
pub struct FnAction<D, R, U>
where
    R: FnMut(&mut D) -> bool,
    U: FnMut(&mut D) -> bool,
{
    redo: R,
    undo: U,
    _marker: PhantomData<fn() -> D>,
}

impl<D, R, U> FnAction<D, R, U>
where
    R: FnMut(&mut D) -> bool,
    U: FnMut(&mut D) -> bool,
{
    /// Pair `redo` and `undo` closures into an action.
    pub fn new(redo: R, undo: U) -> Self {
        Self {
            redo,
            undo,
            _marker: PhantomData,
        }
    }
}

impl<D, R, U> Action<D> for FnAction<D, R, U>
where
    R: FnMut(&mut D) -> bool,
    U: FnMut(&mut D) -> bool,
{
    fn redo(&mut self, doc: &mut D) -> bool {
        (self.redo)(doc)
    }

    fn undo(&mut self, doc: &mut D) -> bool {
        (self.undo)(doc)
    }
}

/// Several actions applied and reverted as a single undoable unit.
pub struct CompositeAction<D> {
    actions: Vec<Box<dyn Action<D>>>,
}

impl<D> CompositeAction<D> {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Append a child action. Children apply in insertion order.
    pub fn push(&mut self, action: Box<dyn Action<D>>) {
        self.actions.push(action);
    }

    /// Get the number of child actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the unit holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<D> Default for CompositeAction<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Action<D> for CompositeAction<D> {
    fn redo(&mut self, doc: &mut D) -> bool {
        for action in self.actions.iter_mut() {
            if !action.redo(doc) {
                return false;
            }
        }
        true
    }

    fn undo(&mut self, doc: &mut D) -> bool {
        // Revert in reverse order.
        for action in self.actions.iter_mut().rev() {
            if !action.undo(doc) {
                return false;
            }
        }
        true
    }
}
