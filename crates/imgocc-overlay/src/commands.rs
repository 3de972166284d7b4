//! Reversible canvas commands recorded in the undo history.

use imgocc_core::{ElementId, OverlayError, Result};

use crate::canvas::{CanvasHost, MaskElement};

/// Records the insertion of one element.
///
/// The next sibling is captured when the command is created. Redo puts the
/// element back in front of that sibling, so the sibling must already be in
/// the document when this command is re-applied.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertElement {
    pub id: ElementId,
    pub next_sibling: Option<ElementId>,
    element: Option<MaskElement>, // Some while undone
}

impl InsertElement {
    /// Captures an element that is currently in the document.
    pub fn capture<C: CanvasHost + ?Sized>(canvas: &C, id: ElementId) -> Self {
        Self {
            id,
            next_sibling: canvas.next_sibling(id),
            element: None,
        }
    }

    /// Re-inserts the element (redo).
    pub fn apply<C: CanvasHost + ?Sized>(&mut self, canvas: &mut C) -> Result<()> {
        let Some(element) = self.element.take() else {
            return Ok(());
        };
        if let Err(err) = canvas.insert_before(element.clone(), self.next_sibling) {
            self.element = Some(element);
            return Err(err);
        }
        Ok(())
    }

    /// Removes the element again (undo).
    pub fn unapply<C: CanvasHost + ?Sized>(&mut self, canvas: &mut C) -> Result<()> {
        if self.element.is_some() {
            return Ok(());
        }
        let element = canvas
            .detach(self.id)
            .ok_or(OverlayError::UnknownElement(self.id))?;
        self.element = Some(element);
        Ok(())
    }

    /// True while the element is held by the command rather than the document.
    pub fn is_undone(&self) -> bool {
        self.element.is_some()
    }
}

/// A named group of insertions that is undone and redone as one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchCommand {
    name: String,
    commands: Vec<InsertElement>,
}

impl BatchCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&mut self, command: InsertElement) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Sub-commands in registration order.
    pub fn commands(&self) -> &[InsertElement] {
        &self.commands
    }

    /// Ids of the sub-commands in registration order.
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.commands.iter().map(|c| c.id).collect()
    }

    /// Ids in creation order. Batches are registered last-created first,
    /// so this is the registration order reversed.
    pub fn created_ids(&self) -> Vec<ElementId> {
        self.commands.iter().rev().map(|c| c.id).collect()
    }

    /// Applies sub-commands in registration order.
    ///
    /// On failure the sub-commands already applied are unapplied again, so
    /// the document is left as it was before the call.
    pub fn apply<C: CanvasHost + ?Sized>(&mut self, canvas: &mut C) -> Result<()> {
        for i in 0..self.commands.len() {
            if let Err(err) = self.commands[i].apply(canvas) {
                for done in self.commands[..i].iter_mut().rev() {
                    if let Err(rollback) = done.unapply(canvas) {
                        tracing::warn!("Rollback of {} failed: {}", done.id, rollback);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Unapplies sub-commands in reverse registration order.
    pub fn unapply<C: CanvasHost + ?Sized>(&mut self, canvas: &mut C) -> Result<()> {
        let count = self.commands.len();
        for i in (0..count).rev() {
            if let Err(err) = self.commands[i].unapply(canvas) {
                for done in self.commands[i + 1..].iter_mut() {
                    if let Err(rollback) = done.apply(canvas) {
                        tracing::warn!("Rollback of {} failed: {}", done.id, rollback);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
