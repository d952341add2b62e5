//! A cloneable handle to one externally owned dictionary.
//!
//! Several state stores bind to the same document. Each clone of a
//! [`SharedDictionary`] refers to the same underlying [`Dictionary`]; locks
//! are taken per call and never held across calls.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dictionary::Dictionary;

#[derive(Clone, Default)]
pub struct SharedDictionary {
    inner: Arc<RwLock<Dictionary>>,
}

impl SharedDictionary {
    /// Wrap a dictionary in a new shared handle.
    pub fn new(dict: Dictionary) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dict)),
        }
    }

    /// Shared read access.
    ///
    /// A poisoned lock is recovered: the dictionary is plain data and a
    /// panicking writer cannot leave it structurally invalid.
    pub fn read(&self) -> RwLockReadGuard<'_, Dictionary> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, Dictionary> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// A deep copy of the current contents.
    pub fn snapshot(&self) -> Dictionary {
        self.read().clone()
    }

    /// Replace the contents, returning the previous dictionary.
    pub fn replace(&self, dict: Dictionary) -> Dictionary {
        std::mem::replace(&mut *self.write(), dict)
    }

    /// Returns `true` if both handles refer to the same document.
    pub fn ptr_eq(&self, other: &SharedDictionary) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for SharedDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().len();
        f.debug_struct("SharedDictionary")
            .field("entry_count", &count)
            .finish()
    }
}
