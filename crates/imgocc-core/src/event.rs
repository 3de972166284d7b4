//! Canvas events
//!
//! Provides:
//! - Event types emitted by the canvas document
//! - Event dispatcher for publishing events to subscribers
//!
//! The dispatcher wraps a `tokio::sync::broadcast` channel. Sending does not
//! need a runtime, so the UI thread publishes synchronously and subscribers
//! either `recv().await` or poll with `try_recv`.

use tokio::sync::broadcast;

use crate::constants::EVENT_BUFFER_SIZE;
use crate::geometry::ElementId;

/// Canvas event types
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Elements were inserted or changed, in creation order
    Changed(Vec<ElementId>),
    /// The viewport zoom changed
    Zoomed(f64),
}

impl std::fmt::Display for CanvasEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanvasEvent::Changed(ids) => write!(f, "Changed {} element(s)", ids.len()),
            CanvasEvent::Zoomed(zoom) => write!(f, "Zoom: {:.2}x", zoom),
        }
    }
}

/// Event dispatcher for publishing canvas events to subscribers
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    tx: broadcast::Sender<CanvasEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Number of events kept for slow subscribers
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<CanvasEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers.
    ///
    /// Returns the number of subscribers reached. Having no subscribers is
    /// not an error for the canvas.
    pub fn publish(&self, event: CanvasEvent) -> usize {
        match self.tx.send(event) {
            Ok(n) => n,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!("No subscribers for canvas event: {}", event);
                0
            }
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(EVENT_BUFFER_SIZE)
    }
}
