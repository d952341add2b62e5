//! The [`Registry`] trait consumed by state stores.

use std::any::{Any, TypeId};

use fos_dict::SharedDictionary;

/// A host registry of named objects.
///
/// Implementations must be thread-safe (`Send + Sync`). The trait is object
/// safe so stores can hold an `Arc<dyn Registry>`; typed lookups live on
/// [`RegistryExt`].
pub trait Registry: Send + Sync {
    /// The registry's own name (e.g. the region it serves).
    fn name(&self) -> &str;

    /// Returns `true` if at least one registered object has concrete type
    /// `type_id`.
    fn contains_type(&self, type_id: TypeId) -> bool;

    /// Handle to the state dictionary associated with this registry.
    ///
    /// Every call returns a handle to the same document.
    fn state_dict(&self) -> SharedDictionary;
}

/// Typed lookups over any [`Registry`], including `dyn Registry`.
pub trait RegistryExt: Registry {
    /// Returns `true` if the registry currently holds an object of type `T`.
    fn found_object<T: Any>(&self) -> bool {
        self.contains_type(TypeId::of::<T>())
    }
}

impl<R: Registry + ?Sized> RegistryExt for R {}
