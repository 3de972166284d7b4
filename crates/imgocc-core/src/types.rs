//! Shared-state alias for handing engines to worker threads.

use parking_lot::Mutex;
use std::sync::Arc;

/// A mutex-protected value that can cross threads.
///
/// The OCR worker locks its detector through this while the UI thread
/// keeps its own handle.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
