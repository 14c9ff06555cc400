//! Scoped mutation bracket: capture before, commit or revert after.

use core::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::action::Action;
use crate::manager::HistoryManager;
use crate::snapshot::SnapshotAction;
use crate::HistoryError;

/// Remembers the document state and commits an action if the document
/// has changed.
///
/// The creator borrows the document for the length of the mutation scope;
/// the caller edits through `Deref`/`DerefMut`. Dropping the creator
/// without calling [`commit`](Self::commit) restores the captured state,
/// so every exit path from the scope (early returns included) leaves the
/// document either committed to history or fully reverted.
pub struct ActionCreator<'a, D>
where
    D: Serialize + DeserializeOwned + 'static,
{
    manager: &'a mut HistoryManager<D>,
    doc: &'a mut D,
    pending: Option<SnapshotAction<D>>,
}

impl<'a, D> ActionCreator<'a, D>
where
    D: Serialize + DeserializeOwned + 'static,
{
    /// Capture the document state ahead of a mutation.
    pub fn new(
        manager: &'a mut HistoryManager<D>,
        doc: &'a mut D,
    ) -> Result<Self, HistoryError> {
        let pending = SnapshotAction::capture(doc)?;

        Ok(Self {
            manager,
            doc,
            pending: Some(pending),
        })
    }

    /// Hand the finished mutation to the history.
    ///
    /// No entry is added when the document is unchanged. If encoding the
    /// post-mutation state fails, the scope counts as abandoned: the
    /// document is reverted before the error reaches the caller.
    pub fn commit(mut self) -> Result<(), HistoryError> {
        let mut action = match self.pending.take() {
            Some(action) => action,
            None => return Ok(()),
        };

        match action.finish(self.doc) {
            Ok(true) => {
                self.manager.add(Box::new(action));
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(err) => {
                // Leave the action pending so drop reverts the mutation.
                self.pending = Some(action);
                Err(err)
            }
        }
    }
}

impl<D> Drop for ActionCreator<'_, D>
where
    D: Serialize + DeserializeOwned + 'static,
{
    fn drop(&mut self) {
        if let Some(mut action) = self.pending.take() {
            // Abandoned scope: restore the captured state.
            action.undo(self.doc);
        }
    }
}

impl<D> Deref for ActionCreator<'_, D>
where
    D: Serialize + DeserializeOwned + 'static,
{
    type Target = D;

    fn deref(&self) -> &D {
        self.doc
    }
}

impl<D> DerefMut for ActionCreator<'_, D>
where
    D: Serialize + DeserializeOwned + 'static,
{
    fn deref_mut(&mut self) -> &mut D {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Terrain {
        tiles: Vec<u8>,
    }

    fn terrain() -> Terrain {
        Terrain {
            tiles: vec![0; 8],
        }
    }

    #[test]
    fn test_commit_records_the_mutation() {
        let mut history = HistoryManager::new();
        let mut doc = terrain();

        let mut edit = ActionCreator::new(&mut history, &mut doc).unwrap();
        edit.tiles[3] = 5;
        edit.commit().unwrap();

        assert_eq!(doc.tiles[3], 5);
        assert_eq!(history.len(), 1);
        assert!(history.is_undo_available());

        assert!(history.undo(&mut doc));
        assert_eq!(doc, terrain());

        assert!(history.redo(&mut doc));
        assert_eq!(doc.tiles[3], 5);
    }

    #[test]
    fn test_commit_without_change_adds_nothing() {
        let mut history = HistoryManager::new();
        let mut doc = terrain();

        let edit = ActionCreator::new(&mut history, &mut doc).unwrap();
        edit.commit().unwrap();

        assert!(history.is_empty());
        assert!(!history.is_undo_available());
    }

    #[test]
    fn test_abandoned_scope_reverts_the_document() {
        let mut history = HistoryManager::new();
        let mut doc = terrain();

        {
            let mut edit = ActionCreator::new(&mut history, &mut doc).unwrap();
            edit.tiles[0] = 1;
            edit.tiles[7] = 2;
            // Dropped without commit.
        }

        assert_eq!(doc, terrain());
        assert!(history.is_empty());
    }

    #[test]
    fn test_abandon_on_early_exit() {
        fn risky_edit(
            history: &mut HistoryManager<Terrain>,
            doc: &mut Terrain,
            fail: bool,
        ) -> Result<(), HistoryError> {
            let mut edit = ActionCreator::new(history, doc)?;
            edit.tiles[1] = 9;
            if fail {
                // Early return: the half-done edit must not survive.
                return Ok(());
            }
            edit.commit()
        }

        let mut history = HistoryManager::new();
        let mut doc = terrain();

        risky_edit(&mut history, &mut doc, true).unwrap();
        assert_eq!(doc, terrain());
        assert!(history.is_empty());

        risky_edit(&mut history, &mut doc, false).unwrap();
        assert_eq!(doc.tiles[1], 9);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_sequential_edits_stack_up() {
        let mut history = HistoryManager::new();
        let mut doc = terrain();

        for i in 0..3u8 {
            let mut edit = ActionCreator::new(&mut history, &mut doc).unwrap();
            edit.tiles[i as usize] = i + 1;
            edit.commit().unwrap();
        }

        assert_eq!(history.len(), 3);
        assert_eq!(doc.tiles[..3], [1, 2, 3]);

        assert!(history.undo(&mut doc));
        assert!(history.undo(&mut doc));
        assert_eq!(doc.tiles[..3], [1, 0, 0]);
        assert_eq!(history.redo_count(), 2);
    }
}
