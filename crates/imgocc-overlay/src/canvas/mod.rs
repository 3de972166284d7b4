//! Canvas document holding occlusion masks.

mod types;

pub use types::{ElementKind, MaskElement, StyleContext};

use imgocc_core::{
    constants::DEFAULT_ID_PREFIX, CanvasEvent, ElementId, EventDispatcher, OverlayError, Result,
};
use imgocc_settings::{CanvasSettings, StyleSettings};
use tokio::sync::broadcast;

use crate::viewport::Viewport;

/// The editor canvas as seen by the overlay manager.
///
/// Elements live in a single ordered layer. Hosts own the document, the id
/// allocator, the current style and the "changed" notification.
pub trait CanvasHost {
    /// Current fill, stroke and stroke width.
    fn style(&self) -> StyleContext;

    /// Allocates a fresh, unique element id.
    fn allocate_id(&mut self) -> ElementId;

    /// Appends `element` to the document and returns its id.
    fn create_element(&mut self, element: MaskElement) -> ElementId;

    /// Element that follows `id` in document order.
    fn next_sibling(&self, id: ElementId) -> Option<ElementId>;

    /// Removes an element from the document, returning it.
    fn detach(&mut self, id: ElementId) -> Option<MaskElement>;

    /// Inserts `element` before `anchor`, or at the end when `anchor` is `None`.
    fn insert_before(&mut self, element: MaskElement, anchor: Option<ElementId>) -> Result<()>;

    /// Notifies listeners that `elements` changed.
    fn emit_changed(&mut self, elements: &[ElementId]);

    /// Zooms so the whole image is visible.
    fn fit_to_canvas(&mut self, padding: f64);
}

/// In-memory canvas state.
#[derive(Debug, Clone)]
pub struct MaskCanvas {
    elements: Vec<MaskElement>,
    next_id: u64,
    style: StyleContext,
    id_prefix: String,
    image_size: Option<(f64, f64)>,
    viewport: Viewport,
    events: EventDispatcher,
}

impl MaskCanvas {
    /// Creates a new canvas with default size and style.
    pub fn new() -> Self {
        Self::with_size(1200.0, 800.0)
    }

    /// Creates a canvas with specified dimensions.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            next_id: 1,
            style: StyleContext::default(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            image_size: None,
            viewport: Viewport::new(width, height),
            events: EventDispatcher::default(),
        }
    }

    /// Creates a canvas from configuration.
    pub fn from_settings(canvas: &CanvasSettings, style: &StyleSettings) -> Self {
        let mut this = Self::with_size(canvas.width, canvas.height);
        this.id_prefix = canvas.id_prefix.clone();
        this.style = StyleContext::from(style);
        this
    }

    /// Replaces the current drawing style.
    pub fn set_style(&mut self, style: StyleContext) {
        self.style = style;
    }

    /// Sets the size of the background image in canvas units.
    pub fn set_image_size(&mut self, width: f64, height: f64) {
        self.image_size = Some((width, height));
    }

    pub fn image_size(&self) -> Option<(f64, f64)> {
        self.image_size
    }

    /// Returns the number of elements in the document.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Gets an element by id.
    pub fn get(&self, id: ElementId) -> Option<&MaskElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &MaskElement> {
        self.elements.iter()
    }

    /// Element ids in document order.
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id).collect()
    }

    /// Rendered id of an element, e.g. `svg_3`.
    pub fn render_id(&self, id: ElementId) -> String {
        format!("{}{}", self.id_prefix, id.0)
    }

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Subscribe to canvas events.
    pub fn subscribe(&self) -> broadcast::Receiver<CanvasEvent> {
        self.events.subscribe()
    }

    /// Removes every element. Allocated ids are not reused.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }
}

impl CanvasHost for MaskCanvas {
    fn style(&self) -> StyleContext {
        self.style.clone()
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn create_element(&mut self, element: MaskElement) -> ElementId {
        let id = element.id;
        if self.contains(id) {
            tracing::warn!("Element {} created twice; ids should come from allocate_id", id);
        }
        self.elements.push(element);
        id
    }

    fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let pos = self.position(id)?;
        self.elements.get(pos + 1).map(|e| e.id)
    }

    fn detach(&mut self, id: ElementId) -> Option<MaskElement> {
        let pos = self.position(id)?;
        Some(self.elements.remove(pos))
    }

    fn insert_before(&mut self, element: MaskElement, anchor: Option<ElementId>) -> Result<()> {
        if self.contains(element.id) {
            return Err(OverlayError::DuplicateElement(element.id));
        }
        match anchor {
            None => self.elements.push(element),
            Some(anchor) => {
                let pos = self.position(anchor).ok_or(OverlayError::MissingAnchor {
                    element: element.id,
                    anchor,
                })?;
                self.elements.insert(pos, element);
            }
        }
        Ok(())
    }

    fn emit_changed(&mut self, elements: &[ElementId]) {
        self.events.publish(CanvasEvent::Changed(elements.to_vec()));
    }

    fn fit_to_canvas(&mut self, padding: f64) {
        let Some((width, height)) = self.image_size else {
            tracing::debug!("No image loaded, nothing to fit");
            return;
        };
        self.viewport.fit_to_canvas(width, height, padding);
        self.events.publish(CanvasEvent::Zoomed(self.viewport.zoom()));
    }
}

impl Default for MaskCanvas {
    fn default() -> Self {
        Self::new()
    }
}
