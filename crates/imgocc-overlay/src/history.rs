//! Undo/redo history.
//!
//! `HistorySink` is what the overlay manager needs from an undo engine:
//! open a named batch, add insertions to it, and commit it. The in-memory
//! `UndoRedoManager` implements it with bounded undo and redo stacks.

use std::collections::VecDeque;

use imgocc_core::Result;
use imgocc_settings::HistorySettings;

use crate::canvas::CanvasHost;
use crate::commands::{BatchCommand, InsertElement};

/// Receiver of batched history entries.
pub trait HistorySink {
    /// A batch under construction.
    type Batch;

    /// Opens a new batch named `name`.
    fn begin_batch(&mut self, name: &str) -> Self::Batch;

    /// Appends a sub-command to `batch`.
    fn add_to_batch(&mut self, batch: &mut Self::Batch, command: InsertElement);

    /// True if no sub-command was added to `batch`.
    fn is_empty(&self, batch: &Self::Batch) -> bool;

    /// Pushes a completed batch onto the undo stack.
    fn commit(&mut self, batch: Self::Batch);
}

/// Bounded undo/redo stacks of batch commands.
#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    undo_stack: VecDeque<BatchCommand>,
    redo_stack: Vec<BatchCommand>,
    max_depth: usize,
}

impl UndoRedoManager {
    /// Creates a manager keeping at most `max_depth` undoable entries.
    ///
    /// A depth of 0 disables history: commits are dropped.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    pub fn from_settings(settings: &HistorySettings) -> Self {
        Self::new(settings.max_depth)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Name of the entry that the next undo would revert.
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.back().map(|b| b.name())
    }

    /// Name of the entry that the next redo would re-apply.
    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|b| b.name())
    }

    /// Undoable entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &BatchCommand> {
        self.undo_stack.iter()
    }

    /// Drops all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Reverts the most recent entry.
    ///
    /// Returns the name of the reverted entry, or `None` if there was nothing
    /// to undo. A failed entry stays on the undo stack.
    pub fn undo<C: CanvasHost + ?Sized>(&mut self, canvas: &mut C) -> Result<Option<String>> {
        let Some(mut batch) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        if let Err(err) = batch.unapply(canvas) {
            tracing::warn!("Undo of '{}' failed: {}", batch.name(), err);
            self.undo_stack.push_back(batch);
            return Err(err);
        }
        canvas.emit_changed(&batch.created_ids());
        let name = batch.name().to_string();
        tracing::debug!("Undid '{}'", name);
        self.redo_stack.push(batch);
        Ok(Some(name))
    }

    /// Re-applies the most recently undone entry.
    pub fn redo<C: CanvasHost + ?Sized>(&mut self, canvas: &mut C) -> Result<Option<String>> {
        let Some(mut batch) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(err) = batch.apply(canvas) {
            tracing::warn!("Redo of '{}' failed: {}", batch.name(), err);
            self.redo_stack.push(batch);
            return Err(err);
        }
        canvas.emit_changed(&batch.created_ids());
        let name = batch.name().to_string();
        tracing::debug!("Redid '{}'", name);
        self.push_undo(batch);
        Ok(Some(name))
    }

    fn push_undo(&mut self, batch: BatchCommand) {
        if self.max_depth == 0 {
            tracing::debug!("History disabled, dropping '{}'", batch.name());
            return;
        }
        while self.undo_stack.len() >= self.max_depth {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(batch);
    }
}

impl HistorySink for UndoRedoManager {
    type Batch = BatchCommand;

    fn begin_batch(&mut self, name: &str) -> BatchCommand {
        BatchCommand::new(name)
    }

    fn add_to_batch(&mut self, batch: &mut BatchCommand, command: InsertElement) {
        batch.add(command);
    }

    fn is_empty(&self, batch: &BatchCommand) -> bool {
        batch.is_empty()
    }

    fn commit(&mut self, batch: BatchCommand) {
        if batch.is_empty() {
            tracing::debug!("Discarding empty batch '{}'", batch.name());
            return;
        }
        self.redo_stack.clear();
        self.push_undo(batch);
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::from_settings(&HistorySettings::default())
    }
}
