//! Grouping freshly created elements into one history entry.

use imgocc_core::ElementId;

use super::{OverlayManager, DEFAULT_ACTION};
use crate::canvas::CanvasHost;
use crate::commands::InsertElement;
use crate::history::HistorySink;

impl<C: CanvasHost, H: HistorySink> OverlayManager<C, H> {
    /// Records `elements` (in creation order) as one history entry.
    ///
    /// Sub-commands are registered last-created first. Each one re-inserts
    /// its element before the sibling that followed it at capture time, so
    /// on redo every anchor is back in the document before it is needed.
    ///
    /// The changed notification carries `elements` in creation order.
    /// Empty input records nothing.
    pub fn finalize(&mut self, elements: &[ElementId], action_name: &str) {
        if elements.is_empty() {
            return;
        }
        let name = if action_name.is_empty() {
            DEFAULT_ACTION
        } else {
            action_name
        };

        let mut batch = self.history.begin_batch(name);
        for id in elements.iter().rev() {
            let command = InsertElement::capture(&self.canvas, *id);
            self.history.add_to_batch(&mut batch, command);
        }

        if self.history.is_empty(&batch) {
            return;
        }
        self.history.commit(batch);
        self.canvas.emit_changed(elements);
        tracing::info!("Recorded '{}' with {} mask(s)", name, elements.len());
    }
}
