use imgocc_core::{CanvasEvent, ElementId, MaskRect};
use imgocc_overlay::history::HistorySink;
use imgocc_overlay::{CanvasHost, InsertElement, MaskCanvas, MaskElement, UndoRedoManager};
use imgocc_settings::HistorySettings;

fn add_masks(canvas: &mut MaskCanvas, n: usize) -> Vec<ElementId> {
    let style = canvas.style();
    (0..n)
        .map(|i| {
            let id = canvas.allocate_id();
            let rect = MaskRect::new(i as f64 * 10.0, 0.0, 5.0, 5.0);
            canvas.create_element(MaskElement::rect(id, rect, &style))
        })
        .collect()
}

fn commit(manager: &mut UndoRedoManager, canvas: &MaskCanvas, name: &str, ids: &[ElementId]) {
    let mut batch = manager.begin_batch(name);
    for id in ids.iter().rev() {
        manager.add_to_batch(&mut batch, InsertElement::capture(canvas, *id));
    }
    manager.commit(batch);
}

#[test]
fn test_undo_redo_manager_creation() {
    let manager = UndoRedoManager::new(50);
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    assert_eq!(manager.undo_depth(), 0);
    assert_eq!(manager.redo_depth(), 0);
}

#[test]
fn test_from_settings() {
    let manager = UndoRedoManager::from_settings(&HistorySettings { max_depth: 7 });
    assert_eq!(manager.max_depth(), 7);
    assert_eq!(UndoRedoManager::default().max_depth(), 100);
}

#[test]
fn test_empty_batch_is_discarded() {
    let mut manager = UndoRedoManager::new(50);
    let batch = manager.begin_batch("Empty");
    assert!(manager.is_empty(&batch));
    manager.commit(batch);
    assert_eq!(manager.undo_depth(), 0);
}

#[test]
fn test_undo_single_batch() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(50);
    let ids = add_masks(&mut canvas, 2);
    commit(&mut manager, &canvas, "Create", &ids);

    assert_eq!(manager.undo(&mut canvas).unwrap(), Some("Create".to_string()));
    assert_eq!(canvas.element_count(), 0);
    assert!(!manager.can_undo());
    assert!(manager.can_redo());
    assert_eq!(manager.redo_name(), Some("Create"));
}

#[test]
fn test_undo_on_empty_stack() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(50);
    assert_eq!(manager.undo(&mut canvas).unwrap(), None);
    assert_eq!(manager.redo(&mut canvas).unwrap(), None);
}

#[test]
fn test_redo_clears_on_new_commit() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(50);

    let a = add_masks(&mut canvas, 1);
    commit(&mut manager, &canvas, "A", &a);
    let b = add_masks(&mut canvas, 1);
    commit(&mut manager, &canvas, "B", &b);

    manager.undo(&mut canvas).unwrap();
    assert_eq!(manager.redo_depth(), 1);

    let c = add_masks(&mut canvas, 1);
    commit(&mut manager, &canvas, "C", &c);
    assert_eq!(manager.redo_depth(), 0);
    assert_eq!(manager.undo_name(), Some("C"));
}

#[test]
fn test_max_depth_limit() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(3);

    for i in 0..5 {
        let ids = add_masks(&mut canvas, 1);
        commit(&mut manager, &canvas, &format!("Action {}", i), &ids);
    }

    assert_eq!(manager.undo_depth(), 3);
    let names: Vec<&str> = manager.undo_entries().map(|b| b.name()).collect();
    assert_eq!(names, vec!["Action 2", "Action 3", "Action 4"]);
}

#[test]
fn test_clear_history() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(10);
    let ids = add_masks(&mut canvas, 1);
    commit(&mut manager, &canvas, "A", &ids);
    manager.undo(&mut canvas).unwrap();

    manager.clear();
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
}

#[test]
fn test_failed_undo_keeps_entry() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(10);
    let ids = add_masks(&mut canvas, 2);
    commit(&mut manager, &canvas, "A", &ids);

    // The document lost its masks behind the history's back.
    canvas.clear();
    assert!(manager.undo(&mut canvas).is_err());
    assert_eq!(manager.undo_depth(), 1);
}

#[test]
fn test_forward_registration_cannot_be_redone() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(10);
    let ids = add_masks(&mut canvas, 3);

    let mut batch = manager.begin_batch("Forward");
    for id in &ids {
        manager.add_to_batch(&mut batch, InsertElement::capture(&canvas, *id));
    }
    manager.commit(batch);

    manager.undo(&mut canvas).unwrap();
    assert!(manager.redo(&mut canvas).is_err());
    assert_eq!(canvas.element_count(), 0);
    assert_eq!(manager.redo_depth(), 1);
}

#[test]
fn test_reverse_registration_redoes_in_order() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(10);
    let ids = add_masks(&mut canvas, 4);
    commit(&mut manager, &canvas, "Reverse", &ids);

    manager.undo(&mut canvas).unwrap();
    manager.redo(&mut canvas).unwrap();
    assert_eq!(canvas.element_ids(), ids);
}

#[test]
fn test_zero_depth_keeps_no_history() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(0);
    let ids = add_masks(&mut canvas, 2);
    commit(&mut manager, &canvas, "A", &ids);

    assert_eq!(manager.undo_depth(), 0);
    assert!(!manager.can_undo());
    assert_eq!(manager.undo(&mut canvas).unwrap(), None);
    assert_eq!(canvas.element_ids(), ids);
}

#[test]
fn test_undo_redo_notify_in_creation_order() {
    let mut canvas = MaskCanvas::new();
    let mut manager = UndoRedoManager::new(10);
    let ids = add_masks(&mut canvas, 3);
    commit(&mut manager, &canvas, "A", &ids);
    let mut rx = canvas.subscribe();

    manager.undo(&mut canvas).unwrap();
    assert_eq!(rx.try_recv().unwrap(), CanvasEvent::Changed(ids.clone()));

    manager.redo(&mut canvas).unwrap();
    assert_eq!(rx.try_recv().unwrap(), CanvasEvent::Changed(ids));
}
