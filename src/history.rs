//! Bounded undo/redo history over snapshots of the feature collection.

use std::{collections::VecDeque, sync::Arc};

use tracing::debug;

use crate::{error::{PlotError, Result}, feature::Feature};

/// Maximum number of undo entries to keep.
pub const MAX_UNDO_DEPTH: usize = 20;

/// An immutable copy of the feature collection at one point in time.
/// Features are plain data, so cloning them shares nothing with the live collection.
pub type Snapshot = Arc<[Feature]>;

#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn can_undo(&self) -> bool { !self.undo_stack.is_empty() }

    #[inline] pub fn can_redo(&self) -> bool { !self.redo_stack.is_empty() }

    #[inline] pub fn undo_depth(&self) -> usize { self.undo_stack.len() }

    #[inline] pub fn redo_depth(&self) -> usize { self.redo_stack.len() }

    /// Record the current collection before a mutation. Clears the redo stack.
    pub fn capture(&mut self, features: &[Feature]) {
        self.push_undo(Arc::from(features));
        self.redo_stack.clear();
    }

    /// Restore the collection to the most recent capture.
    /// The current collection is saved on the redo stack first.
    pub fn undo(&mut self, features: &mut Vec<Feature>) -> Result<()> {
        let previous = self.undo_stack.pop_back().ok_or(PlotError::EmptyHistory("undo"))?;
        self.redo_stack.push(Arc::from(features.as_slice()));
        restore(features, &previous);
        debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "undo");
        Ok(())
    }

    /// Re-apply the most recently undone state.
    /// The current collection is saved on the undo stack first.
    pub fn redo(&mut self, features: &mut Vec<Feature>) -> Result<()> {
        let next = self.redo_stack.pop().ok_or(PlotError::EmptyHistory("redo"))?;
        self.push_undo(Arc::from(features.as_slice()));
        restore(features, &next);
        debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "redo");
        Ok(())
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        if self.undo_stack.len() > MAX_UNDO_DEPTH {
            self.undo_stack.pop_front();
        }
    }
}

/// Replace the whole collection with a snapshot. Stored measures are kept as is.
fn restore(features: &mut Vec<Feature>, snapshot: &Snapshot) {
    features.clear();
    features.extend(snapshot.iter().cloned());
}
