//! In-memory capturing sink.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::Sink;

/// Sink that keeps every chunk it receives.
///
/// Clones share the same buffer, so a test can install one clone and read
/// back through another.
#[derive(Debug, Clone)]
pub struct InMemorySink {
    id: String,
    chunks: Arc<Mutex<Vec<String>>>,
}

impl InMemorySink {
    /// Create a new empty in-memory sink.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chunks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.chunks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every chunk received so far, concatenated.
    pub fn contents(&self) -> String {
        self.lock().concat()
    }

    /// Every chunk received so far, one entry per `accept` call.
    pub fn chunks(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Take the captured chunks, leaving the sink empty.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }
}

impl Sink for InMemorySink {
    fn id(&self) -> &str {
        &self.id
    }

    fn accept(&self, text: &str) -> io::Result<()> {
        self.lock().push(text.to_owned());
        Ok(())
    }
}
