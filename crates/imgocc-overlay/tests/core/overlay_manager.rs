use std::collections::HashSet;

use imgocc_core::{CanvasEvent, ElementId, MaskRect, SelectionBox};
use imgocc_overlay::commands::InsertElement;
use imgocc_overlay::history::HistorySink;
use imgocc_overlay::overlay::{DEFAULT_ACTION, DRAW_ALL_ACTION, DRAW_IN_SELECTION_ACTION};
use imgocc_overlay::{
    AutoCover, CanvasHost, MaskCanvas, OcrError, OverlayManager, ReadySignal, StyleContext,
    UndoRedoManager,
};

fn manager() -> OverlayManager<MaskCanvas, UndoRedoManager> {
    OverlayManager::new(MaskCanvas::new(), UndoRedoManager::new(50))
}

fn changed_events(rx: &mut tokio::sync::broadcast::Receiver<CanvasEvent>) -> Vec<Vec<ElementId>> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let CanvasEvent::Changed(ids) = event {
            out.push(ids);
        }
    }
    out
}

/// History sink that records every call it receives.
#[derive(Default)]
struct RecordingSink {
    committed: Vec<(String, Vec<ElementId>)>,
    begun: usize,
}

impl HistorySink for RecordingSink {
    type Batch = (String, Vec<ElementId>);

    fn begin_batch(&mut self, name: &str) -> Self::Batch {
        self.begun += 1;
        (name.to_string(), Vec::new())
    }

    fn add_to_batch(&mut self, batch: &mut Self::Batch, command: InsertElement) {
        batch.1.push(command.id);
    }

    fn is_empty(&self, batch: &Self::Batch) -> bool {
        batch.1.is_empty()
    }

    fn commit(&mut self, batch: Self::Batch) {
        self.committed.push(batch);
    }
}

#[derive(Default)]
struct CountingSource {
    ready_calls: usize,
}

impl ReadySignal for CountingSource {
    fn notify_ready(&mut self) {
        self.ready_calls += 1;
    }
}

#[test]
fn test_draw_all_creates_one_element_per_rect() {
    let mut m = manager();
    let mut rx = m.canvas().subscribe();
    let rects = vec![
        MaskRect::new(0.0, 0.0, 10.0, 10.0),
        MaskRect::new(20.0, 0.0, 10.0, 10.0),
        MaskRect::new(40.0, 0.0, 10.0, 10.0),
    ];

    assert_eq!(m.draw_all(&rects), 3);
    assert_eq!(m.canvas().element_count(), 3);

    let placed: Vec<MaskRect> = m.canvas().elements().map(|e| e.rect).collect();
    assert_eq!(placed, rects);

    let events = changed_events(&mut rx);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], m.canvas().element_ids());

    assert_eq!(m.history().undo_depth(), 1);
    assert_eq!(m.history().undo_name(), Some(DRAW_ALL_ACTION));
}

#[test]
fn test_draw_all_reads_current_style() {
    let mut m = manager();
    m.canvas_mut().set_style(StyleContext {
        fill: "#FF7E7E".to_string(),
        stroke: "#000000".to_string(),
        stroke_width: 1.5,
    });
    m.draw_all(&[MaskRect::new(0.0, 0.0, 1.0, 1.0)]);

    m.canvas_mut().set_style(StyleContext {
        fill: "#00FF00".to_string(),
        stroke: "#000000".to_string(),
        stroke_width: 2.0,
    });
    m.draw_all(&[MaskRect::new(5.0, 0.0, 1.0, 1.0)]);

    let fills: Vec<&str> = m.canvas().elements().map(|e| e.fill.as_str()).collect();
    assert_eq!(fills, vec!["#FF7E7E", "#00FF00"]);
    assert_eq!(m.canvas().elements().next().unwrap().stroke_width, 1.5);
}

#[test]
fn test_draw_all_allocates_fresh_ids() {
    let mut m = manager();
    let rect = MaskRect::new(1.0, 1.0, 1.0, 1.0);
    m.draw_all(&[rect, rect]);
    m.draw_all(&[rect]);

    let ids: HashSet<ElementId> = m.canvas().element_ids().into_iter().collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_empty_inputs_are_noops() {
    let mut m = manager();
    let mut rx = m.canvas().subscribe();

    assert_eq!(m.draw_all(&[]), 0);
    assert_eq!(
        m.draw_in_selection(&SelectionBox::new(0.0, 0.0, 100.0, 100.0)),
        0
    );
    m.finalize(&[], "Anything");

    m.store_results(Vec::new());
    assert_eq!(
        m.draw_in_selection(&SelectionBox::new(0.0, 0.0, 100.0, 100.0)),
        0
    );

    assert_eq!(m.canvas().element_count(), 0);
    assert_eq!(m.history().undo_depth(), 0);
    assert!(changed_events(&mut rx).is_empty());
}

#[test]
fn test_malformed_geometry_is_passed_through() {
    let mut m = manager();
    let odd = MaskRect::new(5.0, 5.0, -3.0, 0.0);
    assert_eq!(m.draw_all(&[odd]), 1);
    assert_eq!(m.canvas().elements().next().unwrap().rect, odd);
}

#[test]
fn test_draw_in_selection_filters_stored_rects() {
    let mut m = manager();
    m.store_results(vec![
        MaskRect::new(10.0, 10.0, 20.0, 20.0),
        MaskRect::new(200.0, 200.0, 10.0, 10.0),
    ]);

    let created = m.draw_in_selection(&SelectionBox::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(created, 1);
    assert_eq!(m.canvas().element_count(), 1);
    assert_eq!(
        m.canvas().elements().next().unwrap().rect,
        MaskRect::new(10.0, 10.0, 20.0, 20.0)
    );
    assert_eq!(m.history().undo_depth(), 1);
    assert_eq!(m.history().undo_name(), Some(DRAW_IN_SELECTION_ACTION));
}

#[test]
fn test_draw_in_selection_edge_touching_records_nothing() {
    let mut m = manager();
    m.store_results(vec![MaskRect::new(10.0, 0.0, 5.0, 5.0)]);
    assert_eq!(
        m.draw_in_selection(&SelectionBox::new(0.0, 0.0, 10.0, 10.0)),
        0
    );
    assert_eq!(m.history().undo_depth(), 0);

    m.store_results(vec![MaskRect::new(9.0, 0.0, 5.0, 5.0)]);
    assert_eq!(
        m.draw_in_selection(&SelectionBox::new(0.0, 0.0, 10.0, 10.0)),
        1
    );
}

#[test]
fn test_second_delivery_replaces_first() {
    let mut m = manager();
    m.store_results(vec![MaskRect::new(10.0, 10.0, 5.0, 5.0)]);
    m.store_results(vec![MaskRect::new(500.0, 500.0, 5.0, 5.0)]);

    assert_eq!(
        m.draw_in_selection(&SelectionBox::new(0.0, 0.0, 100.0, 100.0)),
        0
    );
    assert_eq!(
        m.draw_in_selection(&SelectionBox::new(450.0, 450.0, 100.0, 100.0)),
        1
    );
    assert_eq!(m.store().len(), 1);
}

#[test]
fn test_finalize_registers_in_reverse_and_notifies_in_order() {
    let mut canvas = MaskCanvas::new();
    let mut rx = canvas.subscribe();
    let style = canvas.style();
    let ids: Vec<ElementId> = (0..3)
        .map(|i| {
            let id = canvas.allocate_id();
            let rect = MaskRect::new(i as f64, 0.0, 1.0, 1.0);
            canvas.create_element(imgocc_overlay::MaskElement::rect(id, rect, &style))
        })
        .collect();

    let mut m = OverlayManager::new(canvas, RecordingSink::default());
    m.finalize(&ids, "Batch");

    let reversed: Vec<ElementId> = ids.iter().rev().copied().collect();
    assert_eq!(m.history().committed, vec![("Batch".to_string(), reversed)]);
    assert_eq!(changed_events(&mut rx), vec![ids]);
}

#[test]
fn test_finalize_default_name() {
    let mut m = manager();
    let id = {
        let canvas = m.canvas_mut();
        let id = canvas.allocate_id();
        let style = canvas.style();
        canvas.create_element(imgocc_overlay::MaskElement::rect(
            id,
            MaskRect::new(0.0, 0.0, 1.0, 1.0),
            &style,
        ))
    };
    m.finalize(&[id], "");
    assert_eq!(m.history().undo_name(), Some(DEFAULT_ACTION));
}

#[test]
fn test_finalize_empty_never_begins_batch() {
    let mut m = OverlayManager::new(MaskCanvas::new(), RecordingSink::default());
    m.finalize(&[], "Nothing");
    assert_eq!(m.history().begun, 0);
    assert!(m.history().committed.is_empty());
}

#[test]
fn test_undo_redo_of_drawn_batch() {
    let mut m = manager();
    m.draw_all(&[
        MaskRect::new(0.0, 0.0, 1.0, 1.0),
        MaskRect::new(2.0, 0.0, 1.0, 1.0),
        MaskRect::new(4.0, 0.0, 1.0, 1.0),
    ]);
    let before = m.canvas().element_ids();
    assert!(m.has_unsaved_masks());

    assert_eq!(m.undo().unwrap(), Some(DRAW_ALL_ACTION.to_string()));
    assert_eq!(m.canvas().element_count(), 0);
    assert!(!m.has_unsaved_masks());

    assert_eq!(m.redo().unwrap(), Some(DRAW_ALL_ACTION.to_string()));
    assert_eq!(m.canvas().element_ids(), before);
    assert_eq!(m.redo().unwrap(), None);
}

#[test]
fn test_undo_restores_between_existing_masks() {
    let mut m = manager();
    m.draw_all(&[MaskRect::new(0.0, 0.0, 1.0, 1.0)]);
    m.store_results(vec![
        MaskRect::new(10.0, 10.0, 5.0, 5.0),
        MaskRect::new(20.0, 20.0, 5.0, 5.0),
    ]);
    m.draw_in_selection(&SelectionBox::new(0.0, 0.0, 100.0, 100.0));
    m.draw_all(&[MaskRect::new(50.0, 50.0, 1.0, 1.0)]);
    let full = m.canvas().element_ids();
    assert_eq!(full.len(), 4);

    m.undo().unwrap();
    m.undo().unwrap();
    assert_eq!(m.canvas().element_ids(), vec![full[0]]);

    m.redo().unwrap();
    m.redo().unwrap();
    assert_eq!(m.canvas().element_ids(), full);
}

#[test]
fn test_auto_cover_states() {
    let mut m = manager();
    assert_eq!(m.auto_cover(), AutoCover::Pending);

    m.store_results(Vec::new());
    assert_eq!(m.auto_cover(), AutoCover::NothingDetected);

    m.store_results(vec![
        MaskRect::new(1.0, 1.0, 1.0, 1.0),
        MaskRect::new(3.0, 3.0, 1.0, 1.0),
    ]);
    assert_eq!(m.auto_cover(), AutoCover::Covered(2));
    assert_eq!(m.canvas().element_count(), 2);
    assert_eq!(AutoCover::Covered(2).to_string(), "Added 2 occlusion masks.");
}

#[test]
fn test_failed_ocr_counts_as_empty_delivery() {
    let mut m = manager();
    m.accept_ocr_outcome(Err(OcrError::NoImage));
    assert!(m.store().is_delivered());
    assert_eq!(m.auto_cover(), AutoCover::NothingDetected);
}

#[test]
fn test_store_results_json() {
    let mut m = manager();
    let count = m
        .store_results_json(r#"[{"x": 1, "y": 2, "w": 3, "h": 4}, {"x": 5, "y": 6, "w": 7, "h": 8}]"#)
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(
        m.store().get().unwrap()[1],
        MaskRect::new(5.0, 6.0, 7.0, 8.0)
    );

    assert!(m.store_results_json("{\"x\": 1}").is_err());
    assert_eq!(m.store().len(), 2);
}

#[test]
fn test_start_signals_once() {
    let mut m = manager();
    let mut source = CountingSource::default();
    assert!(m.start(&mut source));
    assert!(!m.start(&mut source));
    assert_eq!(source.ready_calls, 1);
    assert!(m.is_started());
}
