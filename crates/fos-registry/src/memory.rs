//! In-memory registry for hosts, tests, and embedding.
//!
//! [`InMemoryRegistry`] stores type-erased objects in insertion order behind
//! a `RwLock` and owns one [`SharedDictionary`] for state.

use std::any::{Any, TypeId};
use std::sync::{PoisonError, RwLock};

use fos_dict::SharedDictionary;
use fos_types::validate_word;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::traits::Registry;

struct Registered {
    name: String,
    object: Box<dyn Any + Send + Sync>,
}

/// An in-memory implementation of [`Registry`].
pub struct InMemoryRegistry {
    name: String,
    objects: RwLock<Vec<Registered>>,
    state: SharedDictionary,
}

impl InMemoryRegistry {
    /// Create an empty registry with a fresh, empty state dictionary.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_state_dict(name, SharedDictionary::default())
    }

    /// Create an empty registry bound to an existing state dictionary.
    pub fn with_state_dict(name: impl Into<String>, state: SharedDictionary) -> Self {
        Self {
            name: name.into(),
            objects: RwLock::new(Vec::new()),
            state,
        }
    }

    /// Register `object` under `name`.
    pub fn insert<T: Any + Send + Sync>(&self, name: &str, object: T) -> Result<()> {
        validate_word(name)?;
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        if objects.iter().any(|r| r.name == name) {
            return Err(RegistryError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        objects.push(Registered {
            name: name.to_string(),
            object: Box::new(object),
        });
        debug!(registry = %self.name, object = name, kind = std::any::type_name::<T>(), "object registered");
        Ok(())
    }

    /// Remove the object registered under `name`. Returns `true` if it existed.
    pub fn remove(&self, name: &str) -> bool {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let before = objects.len();
        objects.retain(|r| r.name != name);
        let removed = objects.len() != before;
        if removed {
            debug!(registry = %self.name, object = name, "object removed");
        }
        removed
    }

    /// Returns `true` if an object is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|r| r.name == name)
    }

    /// Run `f` against the object named `name`, which must be a `T`.
    pub fn with_object<T: Any, R>(&self, name: &str, f: impl FnOnce(&T) -> R) -> Result<R> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        let registered = objects
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })?;
        let object = registered
            .object
            .downcast_ref::<T>()
            .ok_or_else(|| RegistryError::WrongType {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })?;
        Ok(f(object))
    }

    /// Names of all registered objects, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Registry for InMemoryRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains_type(&self, type_id: TypeId) -> bool {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|r| (*r.object).type_id() == type_id)
    }

    fn state_dict(&self) -> SharedDictionary {
        self.state.clone()
    }
}

impl std::fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRegistry")
            .field("name", &self.name)
            .field("object_count", &self.len())
            .finish()
    }
}
