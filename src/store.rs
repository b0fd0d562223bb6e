//! ==============================================================================
//! store.rs - in-memory sensor and limit stores
//! ==============================================================================
//!
//! purpose:
//!     process-wide holders for the latest Reading and the latest LimitSet.
//!     each store exposes exactly two operations: take a snapshot, or
//!     replace the whole value. there is no field-level mutation.
//!
//! sharing:
//!     arc<rwlock<>> for thread-safe sharing between request handlers:
//!     - arc: cheap clones handed to every handler through axum state
//!     - rwlock: many concurrent GET /data readers, one writer at a time
//!     two overlapping writers race; whichever takes the lock last wins.
//!     a reader never sees a half-written record.
//!
//! ==============================================================================

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{LimitSet, Reading};

/// a single value that can only be read whole or replaced whole
#[derive(Debug, Default)]
pub struct Slot<T> {
    inner: Arc<RwLock<T>>,
}

// manual impl: derive(Clone) would demand T: Clone for the handle itself
impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Slot<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// copy of the current value
    pub async fn snapshot(&self) -> T {
        self.inner.read().await.clone()
    }

    /// overwrite the current value, returning the one it replaced
    pub async fn replace(&self, value: T) -> T {
        let mut guard = self.inner.write().await;
        std::mem::replace(&mut *guard, value)
    }
}

/// latest reading, zeros until the first ingest
pub type SensorStore = Slot<Reading>;

/// latest limits, all unset until the first set-limits call
pub type LimitStore = Slot<LimitSet>;
