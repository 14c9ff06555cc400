//! Full-snapshot actions over serializable documents.

use core::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::action::Action;
use crate::HistoryError;

/// A reversible change captured as the encoded document state before and
/// after a mutation.
///
/// This is what [`ActionCreator`](crate::ActionCreator) commits to the
/// history. Restoring decodes the stored bytes over the live document; a
/// decode failure leaves the document untouched and reports `false`.
pub struct SnapshotAction<D> {
    before: Vec<u8>,
    after: Vec<u8>,
    _marker: PhantomData<fn() -> D>,
}

impl<D> SnapshotAction<D>
where
    D: Serialize + DeserializeOwned,
{
    /// Build an action from explicit pre- and post-mutation states.
    pub fn new(before: &D, after: &D) -> Result<Self, HistoryError> {
        Ok(Self {
            before: Self::encode(before)?,
            after: Self::encode(after)?,
            _marker: PhantomData,
        })
    }

    /// Capture the document state ahead of a mutation. The post-mutation
    /// state starts out identical and is filled in by [`finish`](Self::finish).
    pub(crate) fn capture(doc: &D) -> Result<Self, HistoryError> {
        let before = Self::encode(doc)?;

        Ok(Self {
            after: before.clone(),
            before,
            _marker: PhantomData,
        })
    }

    /// Capture the post-mutation state. Reports whether the document
    /// actually changed.
    pub(crate) fn finish(&mut self, doc: &D) -> Result<bool, HistoryError> {
        let after = Self::encode(doc)?;

        if after == self.before {
            return Ok(false);
        }

        self.after = after;
        Ok(true)
    }

    fn encode(doc: &D) -> Result<Vec<u8>, HistoryError> {
        bincode::serialize(doc).map_err(HistoryError::Encode)
    }

    fn restore(doc: &mut D, bytes: &[u8]) -> bool {
        match bincode::deserialize(bytes) {
            Ok(state) => {
                *doc = state;
                true
            }
            Err(err) => {
                log::error!("failed to decode document snapshot: {}", err);
                false
            }
        }
    }
}

impl<D> Action<D> for SnapshotAction<D>
where
    D: Serialize + DeserializeOwned,
{
    fn redo(&mut self, doc: &mut D) -> bool {
        Self::restore(doc, &self.after)
    }

    fn undo(&mut self, doc: &mut D) -> bool {
        Self::restore(doc, &self.before)
    }
}
