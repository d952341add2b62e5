//! [`FunctionObjectState`], the per-function-object view of the state
//! dictionary.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use fos_dict::{Dictionary, Entry, SharedDictionary};
use fos_registry::{Registry, RegistryExt};
use fos_types::{validate_word, StateValue, TypeTag, Value};
use tracing::{debug, warn};

use crate::config::StateConfig;
use crate::error::{StateError, StateResult};

/// Top-level key under which every result is stored.
pub const RESULTS_KEY: &str = "results";

/// Scoped property and result access for one function object.
///
/// A store is bound to a registry and a name for its whole life. It holds a
/// handle to the registry's state dictionary but never owns it: dropping the
/// store leaves the document untouched. The store is neither `Clone` nor
/// `Copy`; function objects hold one as a field.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use fos_registry::InMemoryRegistry;
/// use fos_state::FunctionObjectState;
///
/// let registry = Arc::new(InMemoryRegistry::new("region0"));
/// let state = FunctionObjectState::new(registry, "forces1").unwrap();
///
/// state.set_result("Cd", 0.31).unwrap();
/// assert_eq!(state.get_result("Cd", 0.0).unwrap(), 0.31);
/// assert_eq!(state.get_property("iter", 0usize).unwrap(), 0);
/// ```
pub struct FunctionObjectState {
    registry: Arc<dyn Registry>,
    name: String,
    active: bool,
    state: SharedDictionary,
    config: StateConfig,
}

impl FunctionObjectState {
    /// Bind a new store to `registry` under `name`, with default configuration.
    pub fn new(registry: Arc<dyn Registry>, name: &str) -> StateResult<Self> {
        Self::with_config(registry, name, StateConfig::default())
    }

    /// Bind a new store to `registry` under `name` with an explicit
    /// configuration.
    pub fn with_config(
        registry: Arc<dyn Registry>,
        name: &str,
        config: StateConfig,
    ) -> StateResult<Self> {
        validate_word(name).map_err(StateError::InvalidName)?;
        let state = registry.state_dict();
        debug!(object = name, registry = registry.name(), "state store bound");
        Ok(Self {
            registry,
            name: name.to_string(),
            active: false,
            state,
            config,
        })
    }

    /// The name this store was bound under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The result of the most recent [`set_active`](Self::set_active) call,
    /// `false` before the first one.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Refresh the active flag: `true` iff the registry currently holds an
    /// object of type `T`.
    ///
    /// The flag is not re-evaluated on its own; call this again whenever the
    /// registry contents may have changed.
    pub fn set_active<T: Any>(&mut self) -> bool {
        self.active = self.registry.found_object::<T>();
        if self.active {
            debug!(object = %self.name, required = std::any::type_name::<T>(), "activated");
        } else if self.config.warn_on_inactive {
            warn!(
                object = %self.name,
                required = std::any::type_name::<T>(),
                registry = self.registry.name(),
                "required type not available, deactivating"
            );
        }
        self.active
    }

    /// Handle to the bound state dictionary.
    pub fn state_dict(&self) -> &SharedDictionary {
        &self.state
    }

    /// The configuration this store was created with.
    pub fn config(&self) -> &StateConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    /// Returns `true` if `entry` holds a value in the flat property region.
    /// An object region of the same name does not count.
    pub fn found_property(&self, entry: &str) -> bool {
        self.found(&[], entry)
    }

    /// Returns `true` if `entry` exists in `object`'s property region.
    pub fn found_object_property(&self, object: &str, entry: &str) -> bool {
        object != RESULTS_KEY && self.found(&[object], entry)
    }

    /// Read a flat property, or `default` if it is absent.
    pub fn get_property<T: StateValue>(&self, entry: &str, default: T) -> StateResult<T> {
        Ok(self.find_property(entry)?.unwrap_or(default))
    }

    /// Read a flat property, `Ok(None)` if it is absent.
    pub fn find_property<T: StateValue>(&self, entry: &str) -> StateResult<Option<T>> {
        self.lookup(&[], entry)
    }

    /// Read a flat property into `value`.
    ///
    /// Returns `Ok(false)` and leaves `value` untouched if the entry is absent.
    pub fn read_property<T: StateValue>(&self, entry: &str, value: &mut T) -> StateResult<bool> {
        self.read_into(&[], entry, value)
    }

    /// Insert or overwrite a flat property.
    pub fn set_property<T: StateValue>(&self, entry: &str, value: T) -> StateResult<()> {
        if entry == RESULTS_KEY && self.config.warn_on_reserved_key {
            warn!(object = %self.name, entry, "property written under the reserved results key");
        }
        self.store(&[], entry, value)
    }

    /// Read a property of `object`, or `default` if the object or entry is
    /// absent.
    pub fn get_object_property<T: StateValue>(
        &self,
        object: &str,
        entry: &str,
        default: T,
    ) -> StateResult<T> {
        Ok(self.find_object_property(object, entry)?.unwrap_or(default))
    }

    /// Read a property of `object`, `Ok(None)` if the object or entry is
    /// absent.
    pub fn find_object_property<T: StateValue>(
        &self,
        object: &str,
        entry: &str,
    ) -> StateResult<Option<T>> {
        check_object(object)?;
        self.lookup(&[object], entry)
    }

    /// Read a property of `object` into `value`, leaving it untouched if absent.
    pub fn read_object_property<T: StateValue>(
        &self,
        object: &str,
        entry: &str,
        value: &mut T,
    ) -> StateResult<bool> {
        check_object(object)?;
        self.read_into(&[object], entry, value)
    }

    /// Insert or overwrite a property of `object`, creating its region on
    /// first write.
    ///
    /// `object` may not be [`RESULTS_KEY`]: that region holds published
    /// results, not properties.
    pub fn set_object_property<T: StateValue>(
        &self,
        object: &str,
        entry: &str,
        value: T,
    ) -> StateResult<()> {
        check_object(object)?;
        self.store(&[object], entry, value)
    }

    /// Snapshot of this store's own object region (`name()`); empty if it has
    /// never been written.
    pub fn property_dict(&self) -> Dictionary {
        if check_object(&self.name).is_err() {
            return Dictionary::new();
        }
        self.with_scope(&[self.name.as_str()], Dictionary::clone)
            .unwrap_or_else(Dictionary::new)
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    /// Returns `true` if a flat result named `entry` has been published.
    pub fn found_result(&self, entry: &str) -> bool {
        self.found(&[RESULTS_KEY], entry)
    }

    /// Returns `true` if `object` has published a result named `entry`.
    pub fn found_object_result(&self, object: &str, entry: &str) -> bool {
        self.found(&[RESULTS_KEY, object], entry)
    }

    /// Publish a flat result.
    pub fn set_result<T: StateValue>(&self, entry: &str, value: T) -> StateResult<()> {
        self.store(&[RESULTS_KEY], entry, value)
    }

    /// Publish a result under `object`.
    pub fn set_object_result<T: StateValue>(
        &self,
        object: &str,
        entry: &str,
        value: T,
    ) -> StateResult<()> {
        self.store(&[RESULTS_KEY, object], entry, value)
    }

    /// Read a flat result, or `default` if it is absent.
    pub fn get_result<T: StateValue>(&self, entry: &str, default: T) -> StateResult<T> {
        Ok(self.find_result(entry)?.unwrap_or(default))
    }

    /// Read a flat result, `Ok(None)` if it is absent.
    ///
    /// Generic consumers read with `T = Value` to get the result without
    /// knowing its type.
    pub fn find_result<T: StateValue>(&self, entry: &str) -> StateResult<Option<T>> {
        self.lookup(&[RESULTS_KEY], entry)
    }

    /// Read a result of `object`, or `default` if it is absent.
    pub fn get_object_result<T: StateValue>(
        &self,
        object: &str,
        entry: &str,
        default: T,
    ) -> StateResult<T> {
        Ok(self.find_object_result(object, entry)?.unwrap_or(default))
    }

    /// Read a result of `object`, `Ok(None)` if it is absent.
    pub fn find_object_result<T: StateValue>(
        &self,
        object: &str,
        entry: &str,
    ) -> StateResult<Option<T>> {
        self.lookup(&[RESULTS_KEY, object], entry)
    }

    /// Type tag of a flat result, without decoding it. `None` if absent.
    pub fn result_type(&self, entry: &str) -> Option<TypeTag> {
        self.type_of(&[RESULTS_KEY], entry)
    }

    /// Type tag of a result under `object`. `None` if absent.
    pub fn object_result_type(&self, object: &str, entry: &str) -> Option<TypeTag> {
        self.type_of(&[RESULTS_KEY, object], entry)
    }

    /// Flat result names, in insertion order. Object regions are not listed.
    pub fn result_entries(&self) -> Vec<String> {
        self.with_scope(&[RESULTS_KEY], |scope| {
            scope.value_keys().map(str::to_owned).collect::<Vec<_>>()
        })
        .unwrap_or_default()
    }

    /// Result names under `object`, in insertion order.
    pub fn object_result_entries(&self, object: &str) -> Vec<String> {
        self.with_scope(&[RESULTS_KEY, object], |scope| {
            scope.value_keys().map(str::to_owned).collect::<Vec<_>>()
        })
        .unwrap_or_default()
    }

    /// Names of objects that have published results, in insertion order.
    pub fn result_objects(&self) -> Vec<String> {
        self.with_scope(&[RESULTS_KEY], |scope| {
            scope.dict_keys().map(str::to_owned).collect::<Vec<_>>()
        })
        .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Scoped access
    // -----------------------------------------------------------------------

    fn found(&self, path: &[&str], entry: &str) -> bool {
        self.with_scope(path, |scope| value_entry(scope, entry).is_some())
            .unwrap_or(false)
    }

    fn type_of(&self, path: &[&str], entry: &str) -> Option<TypeTag> {
        self.with_scope(path, |scope| {
            value_entry(scope, entry).map(|v| v.type_tag())
        })
        .flatten()
    }

    /// Run `f` on the sub-dictionary at `path`, if every level exists.
    ///
    /// Used by probes that must not fail: an invalid name reads as "absent".
    fn with_scope<R>(&self, path: &[&str], f: impl FnOnce(&Dictionary) -> R) -> Option<R> {
        let dict = self.state.read();
        match descend(&dict, path) {
            Ok(scope) => scope.map(f),
            Err(e) => {
                debug!(object = %self.name, ?path, error = %e, "invalid region name, treating as absent");
                None
            }
        }
    }

    fn lookup<T: StateValue>(&self, path: &[&str], entry: &str) -> StateResult<Option<T>> {
        validate_word(entry).map_err(StateError::InvalidName)?;
        let dict = self.state.read();
        let Some(scope) = descend(&dict, path)? else {
            return Ok(None);
        };
        match value_entry(scope, entry) {
            None => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .map_err(|source| StateError::TypeMismatch {
                    entry: qualified(path, entry),
                    source,
                }),
        }
    }

    fn read_into<T: StateValue>(
        &self,
        path: &[&str],
        entry: &str,
        value: &mut T,
    ) -> StateResult<bool> {
        match self.lookup(path, entry)? {
            Some(found) => {
                *value = found;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn store<T: StateValue>(&self, path: &[&str], entry: &str, value: T) -> StateResult<()> {
        validate_word(entry).map_err(StateError::InvalidName)?;
        let value = value.into_value().map_err(|source| StateError::Encode {
            entry: qualified(path, entry),
            source,
        })?;
        let tag = value.type_tag();

        let mut dict = self.state.write();
        let mut scope: &mut Dictionary = &mut dict;
        for name in path {
            validate_word(name).map_err(StateError::InvalidName)?;
            scope = scope.sub_dict_or_add(name)?;
        }
        scope.set_value(entry, value);
        debug!(object = %self.name, entry = %qualified(path, entry), %tag, "entry stored");
        Ok(())
    }
}

/// Walk `path` from `root` for reading. `Ok(None)` if any level is absent or
/// holds a value instead of a region.
fn descend<'d>(root: &'d Dictionary, path: &[&str]) -> StateResult<Option<&'d Dictionary>> {
    let mut scope = root;
    for name in path {
        validate_word(name).map_err(StateError::InvalidName)?;
        match scope.get(name).and_then(Entry::as_dict) {
            Some(next) => scope = next,
            None => return Ok(None),
        }
    }
    Ok(Some(scope))
}

/// The value stored under `entry`. Flat regions share their level with
/// object regions, which are not values.
fn value_entry<'d>(scope: &'d Dictionary, entry: &str) -> Option<&'d Value> {
    scope.get(entry).and_then(Entry::as_value)
}

fn check_object(object: &str) -> StateResult<()> {
    if object == RESULTS_KEY {
        return Err(StateError::ReservedName(object.to_string()));
    }
    Ok(())
}

fn qualified(path: &[&str], entry: &str) -> String {
    let mut out = path.join("/");
    if !out.is_empty() {
        out.push('/');
    }
    out.push_str(entry);
    out
}

impl fmt::Debug for FunctionObjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionObjectState")
            .field("name", &self.name)
            .field("active", &self.active)
            .field("registry", &self.registry.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_registry::InMemoryRegistry;
    use proptest::prelude::*;

    struct Mesh;
    struct Field;

    fn registry() -> Arc<InMemoryRegistry> {
        Arc::new(InMemoryRegistry::new("region0"))
    }

    fn store(name: &str) -> FunctionObjectState {
        FunctionObjectState::new(registry(), name).unwrap()
    }

    // -----------------------------------------------------------------------
    // Construction and gate
    // -----------------------------------------------------------------------

    #[test]
    fn new_store_is_inactive() {
        let state = store("avg1");
        assert_eq!(state.name(), "avg1");
        assert!(!state.active());
    }

    #[test]
    fn invalid_name_rejected() {
        let err = FunctionObjectState::new(registry(), "bad name").unwrap_err();
        assert!(matches!(err, StateError::InvalidName(_)));
    }

    #[test]
    fn set_active_follows_registry() {
        let reg = registry();
        let mut state = FunctionObjectState::new(reg.clone(), "avg1").unwrap();

        assert!(!state.set_active::<Mesh>());
        reg.insert("mesh", Mesh).unwrap();
        assert!(state.set_active::<Mesh>());
        assert!(state.active());
        assert!(!state.set_active::<Field>());
        assert!(!state.active());

        reg.insert("p", Field).unwrap();
        assert!(state.set_active::<Field>());
    }

    #[test]
    fn active_is_sticky_until_next_check() {
        let reg = registry();
        reg.insert("mesh", Mesh).unwrap();
        let mut state = FunctionObjectState::new(reg.clone(), "avg1").unwrap();
        assert!(state.set_active::<Mesh>());

        reg.remove("mesh");
        assert!(state.active());
        assert!(!state.set_active::<Mesh>());
        assert!(!state.active());
    }

    #[test]
    fn stores_on_one_registry_share_the_document() {
        let reg = registry();
        let a = FunctionObjectState::new(reg.clone(), "a").unwrap();
        let b = FunctionObjectState::new(reg.clone(), "b").unwrap();
        assert!(a.state_dict().ptr_eq(b.state_dict()));

        a.set_property("shared", 1i32).unwrap();
        assert_eq!(b.get_property("shared", 0i32).unwrap(), 1);
    }

    #[test]
    fn dropping_store_keeps_document() {
        let reg = registry();
        {
            let state = FunctionObjectState::new(reg.clone(), "tmp").unwrap();
            state.set_property("k", true).unwrap();
        }
        assert!(reg.state_dict().read().found("k"));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[test]
    fn absent_property_returns_default() {
        let state = store("avg1");
        assert_eq!(state.get_property("missing", 2.5).unwrap(), 2.5);
        assert!(!state.found_property("missing"));
    }

    #[test]
    fn property_roundtrip_regardless_of_gate() {
        let state = store("avg1");
        assert!(!state.active());
        state.set_property("count", 3usize).unwrap();
        assert!(state.found_property("count"));
        assert_eq!(state.get_property("count", 0usize).unwrap(), 3);
    }

    #[test]
    fn set_property_overwrites() {
        let state = store("avg1");
        state.set_property("x", 1.0).unwrap();
        state.set_property("x", 2.0).unwrap();
        assert_eq!(state.get_property("x", 0.0).unwrap(), 2.0);
        assert_eq!(state.state_dict().read().len(), 1);
    }

    #[test]
    fn read_property_leaves_value_when_absent() {
        let state = store("avg1");
        let mut value = 42i32;
        assert!(!state.read_property("missing", &mut value).unwrap());
        assert_eq!(value, 42);

        state.set_property("present", 7i32).unwrap();
        assert!(state.read_property("present", &mut value).unwrap());
        assert_eq!(value, 7);
    }

    #[test]
    fn type_mismatch_is_recoverable() {
        let state = store("avg1");
        state.set_property("mode", "fast".to_string()).unwrap();
        let err = state.get_property("mode", 0.0).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("mode"));

        let mut value = 1.0;
        assert!(state.read_property("mode", &mut value).is_err());
        assert_eq!(value, 1.0);
    }

    #[test]
    fn label_reads_back_as_scalar() {
        let state = store("avg1");
        state.set_property("n", 4i64).unwrap();
        assert_eq!(state.get_property("n", 0.0f64).unwrap(), 4.0);
    }

    #[test]
    fn invalid_entry_name_is_error() {
        let state = store("avg1");
        assert!(matches!(
            state.set_property("a b", 1i32),
            Err(StateError::InvalidName(_))
        ));
        assert!(matches!(
            state.get_property("a/b", 1i32),
            Err(StateError::InvalidName(_))
        ));
        assert!(!state.found_property("a b"));
    }

    #[test]
    fn out_of_range_write_is_encode_error() {
        let state = store("avg1");
        let err = state.set_property("big", u64::MAX).unwrap_err();
        assert!(matches!(err, StateError::Encode { .. }));
        assert!(!state.found_property("big"));
    }

    #[test]
    fn object_region_is_not_a_flat_property() {
        let state = store("avg1");
        state.set_object_property("obj", "obj", 1i32).unwrap();
        assert!(!state.found_property("obj"));
        assert_eq!(state.get_property("obj", -1i32).unwrap(), -1);
        assert_eq!(state.find_property::<i32>("obj").unwrap(), None);
        let mut value = 7i32;
        assert!(!state.read_property("obj", &mut value).unwrap());
        assert_eq!(value, 7);
        assert_eq!(state.get_object_property("obj", "obj", 0i32).unwrap(), 1);
    }

    #[test]
    fn flat_property_is_not_an_object_region() {
        let state = store("avg1");
        state.set_property("o", 1i32).unwrap();
        assert!(!state.found_object_property("o", "k"));
        assert_eq!(state.get_object_property("o", "k", 5i32).unwrap(), 5);
    }

    // -----------------------------------------------------------------------
    // Object properties
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_object_reads_default_without_creating_region() {
        let state = store("avg1");
        assert_eq!(state.get_object_property("ghost", "k", 5i32).unwrap(), 5);
        let mut value = 9i32;
        assert!(!state.read_object_property("ghost", "k", &mut value).unwrap());
        assert_eq!(value, 9);
        assert!(!state.state_dict().read().found("ghost"));
    }

    #[test]
    fn object_region_created_lazily_on_write() {
        let state = store("avg1");
        state.set_object_property("avg1", "window", 10i32).unwrap();
        assert!(state.found_object_property("avg1", "window"));
        assert_eq!(state.get_object_property("avg1", "window", 0i32).unwrap(), 10);
        assert_eq!(state.property_dict().len(), 1);
    }

    #[test]
    fn object_namespaces_are_isolated() {
        let state = store("avg1");
        state.set_object_property("o1", "k", 1.0).unwrap();
        assert_eq!(state.get_property("k", -1.0).unwrap(), -1.0);
        assert_eq!(state.get_object_property("o2", "k", -1.0).unwrap(), -1.0);
        assert_eq!(state.get_object_property("o1", "k", -1.0).unwrap(), 1.0);
    }

    #[test]
    fn object_name_holding_value_is_error_on_write() {
        let state = store("avg1");
        state.set_property("o", 1i32).unwrap();
        assert!(matches!(
            state.set_object_property("o", "k", 1i32),
            Err(StateError::Dictionary(_))
        ));
    }

    #[test]
    fn results_cannot_name_an_object() {
        let state = store("forces1");
        let err = state.set_object_property(RESULTS_KEY, "Cd", 5.0).unwrap_err();
        assert!(matches!(err, StateError::ReservedName(_)));
        assert_eq!(state.get_result("Cd", 0.0).unwrap(), 0.0);
        assert!(!state.found_result("Cd"));

        state.set_result("Cd", 0.31).unwrap();
        assert!(!state.found_object_property(RESULTS_KEY, "Cd"));
        assert!(matches!(
            state.get_object_property(RESULTS_KEY, "Cd", 0.0),
            Err(StateError::ReservedName(_))
        ));
        assert!(matches!(
            state.find_object_property::<f64>(RESULTS_KEY, "Cd"),
            Err(StateError::ReservedName(_))
        ));
        let mut value = 1.0;
        assert!(state.read_object_property(RESULTS_KEY, "Cd", &mut value).is_err());
        assert_eq!(value, 1.0);
    }

    #[test]
    fn property_dict_is_empty_before_first_write() {
        let state = store("avg1");
        assert!(state.property_dict().is_empty());
    }

    // -----------------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------------

    #[test]
    fn results_and_properties_do_not_collide() {
        let state = store("forces1");
        state.set_property("Cd", 1.0).unwrap();
        state.set_result("Cd", 0.31).unwrap();
        assert_eq!(state.get_property("Cd", 0.0).unwrap(), 1.0);
        assert_eq!(state.get_result("Cd", 0.0).unwrap(), 0.31);
        assert!(state.found_result("Cd"));
    }

    #[test]
    fn absent_result_returns_default() {
        let state = store("forces1");
        assert_eq!(state.get_result("Cl", 0.0).unwrap(), 0.0);
        assert_eq!(state.get_object_result("forces1", "Cl", 1.5).unwrap(), 1.5);
        assert!(!state.found_object_result("forces1", "Cl"));
    }

    #[test]
    fn object_result_entries_keep_insertion_order() {
        let state = store("forces1");
        state.set_object_result("o", "b", 2.0).unwrap();
        state.set_object_result("o", "a", 1.0).unwrap();
        state.set_object_result("o", "b", 3.0).unwrap();
        assert_eq!(state.object_result_entries("o"), vec!["b", "a"]);
        assert_eq!(state.get_object_result("o", "b", 0.0).unwrap(), 3.0);
    }

    #[test]
    fn object_result_entries_a_then_b() {
        let state = store("forces1");
        state.set_object_result("o", "a", 1.0).unwrap();
        state.set_object_result("o", "b", 2.0).unwrap();
        assert_eq!(state.object_result_entries("o"), vec!["a", "b"]);
    }

    #[test]
    fn flat_result_entries_exclude_object_regions() {
        let state = store("forces1");
        state.set_result("a", 1.0).unwrap();
        state.set_object_result("o", "x", 1.0).unwrap();
        state.set_result("b", true).unwrap();
        assert_eq!(state.result_entries(), vec!["a", "b"]);
        assert_eq!(state.result_objects(), vec!["o"]);
    }

    #[test]
    fn listings_are_empty_when_nothing_published() {
        let state = store("forces1");
        assert!(state.result_entries().is_empty());
        assert!(state.object_result_entries("o").is_empty());
        assert!(state.result_objects().is_empty());
    }

    #[test]
    fn result_type_probe() {
        let state = store("forces1");
        assert_eq!(state.result_type("missing"), None);
        state.set_result("a", 3.5).unwrap();
        assert_eq!(state.result_type("a"), Some(TypeTag::Scalar));

        state.set_object_result("o", "n", 3i32).unwrap();
        state.set_object_result("o", "dir", [1.0, 0.0, 0.0]).unwrap();
        assert_eq!(state.object_result_type("o", "n"), Some(TypeTag::Label));
        assert_eq!(state.object_result_type("o", "dir"), Some(TypeTag::Vector));
        assert_eq!(state.object_result_type("o", "missing"), None);
        assert_eq!(state.object_result_type("ghost", "n"), None);
    }

    #[test]
    fn object_result_region_is_not_a_flat_result() {
        let state = store("forces1");
        state.set_object_result("o", "x", 1.0).unwrap();
        assert_eq!(state.result_type("o"), None);
        assert!(!state.found_result("o"));
        assert_eq!(state.get_result("o", -1.0).unwrap(), -1.0);
        assert_eq!(state.find_result::<Value>("o").unwrap(), None);
    }

    #[test]
    fn non_finite_results_read_back() {
        let state = store("forces1");
        state.set_result("residual", f64::NAN).unwrap();
        state.set_result("growth", f64::INFINITY).unwrap();
        assert!(state.get_result("residual", 0.0_f64).unwrap().is_nan());
        assert_eq!(state.get_result("growth", 0.0).unwrap(), f64::INFINITY);
        assert_eq!(state.result_type("residual"), Some(TypeTag::Scalar));
    }

    #[test]
    fn result_type_with_invalid_name_is_none() {
        let state = store("forces1");
        assert_eq!(state.result_type("not valid"), None);
        assert!(state.object_result_entries("bad/name").is_empty());
    }

    #[test]
    fn reserved_key_property_clobbers_results_region() {
        let state = store("forces1");
        state.set_property(RESULTS_KEY, 1i32).unwrap();
        assert!(state.result_entries().is_empty());
        assert!(matches!(
            state.set_result("Cd", 0.3),
            Err(StateError::Dictionary(_))
        ));
    }

    #[test]
    fn results_written_as_raw_values() {
        let state = store("forces1");
        state
            .set_result("coeffs", Value::List(vec![Value::Scalar(0.3), Value::Scalar(0.1)]))
            .unwrap();
        assert_eq!(state.result_type("coeffs"), Some(TypeTag::List));
        let coeffs: Vec<f64> = state.get_result("coeffs", Vec::new()).unwrap();
        assert_eq!(coeffs, vec![0.3, 0.1]);
    }

    #[test]
    fn find_distinguishes_absent_from_default() {
        let state = store("forces1");
        assert_eq!(state.find_result::<f64>("Cd").unwrap(), None);
        state.set_result("Cd", 0.0).unwrap();
        assert_eq!(state.find_result::<f64>("Cd").unwrap(), Some(0.0));

        state.set_object_result("o", "n", 2i32).unwrap();
        let raw: Option<Value> = state.find_object_result("o", "n").unwrap();
        assert_eq!(raw, Some(Value::Label(2)));
        assert_eq!(state.find_object_property::<i32>("o", "n").unwrap(), None);
        assert_eq!(state.find_property::<i32>("n").unwrap(), None);
    }

    #[test]
    fn debug_format() {
        let debug = format!("{:?}", store("forces1"));
        assert!(debug.contains("FunctionObjectState"));
        assert!(debug.contains("forces1"));
        assert!(debug.contains("region0"));
    }

    // -----------------------------------------------------------------------
    // Properties for all names and values
    // -----------------------------------------------------------------------

    fn word() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_.]{0,12}"
    }

    proptest! {
        #[test]
        fn unset_keys_read_default(k in word(), d in any::<i64>()) {
            let state = store("p");
            prop_assert_eq!(state.get_property(&k, d).unwrap(), d);
        }

        #[test]
        fn set_then_get(k in word(), v in any::<i64>(), d in any::<i64>()) {
            let state = store("p");
            state.set_property(&k, v).unwrap();
            prop_assert_eq!(state.get_property(&k, d).unwrap(), v);
        }

        #[test]
        fn object_writes_are_isolated(
            o in word(),
            o2 in word(),
            k in word(),
            v in any::<i32>(),
        ) {
            prop_assume!(o != o2);
            prop_assume!(o != RESULTS_KEY && o2 != RESULTS_KEY);
            let state = store("p");
            state.set_object_property(&o, &k, v).unwrap();
            prop_assert_eq!(state.get_property(&k, i32::MIN).unwrap(), i32::MIN);
            prop_assert_eq!(state.get_object_property(&o2, &k, i32::MIN).unwrap(), i32::MIN);
        }

        #[test]
        fn results_do_not_shadow_properties(k in word(), v in any::<i32>()) {
            prop_assume!(k != RESULTS_KEY);
            let state = store("p");
            state.set_result(&k, v).unwrap();
            prop_assert!(!state.found_property(&k));
            prop_assert_eq!(state.get_result(&k, 0i32).unwrap(), v);
        }

        #[test]
        fn repeated_writes_are_idempotent(k in word(), v in any::<i32>()) {
            let state = store("p");
            state.set_object_result("o", &k, v).unwrap();
            state.set_object_result("o", &k, v).unwrap();
            prop_assert_eq!(state.object_result_entries("o"), vec![k.clone()]);
            state.set_property(&k, v).unwrap();
            state.set_property(&k, v).unwrap();
            prop_assert_eq!(state.get_property(&k, 0i32).unwrap(), v);
        }
    }
}
