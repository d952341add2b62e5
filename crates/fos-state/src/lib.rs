//! Scoped property and result state for function objects.
//!
//! A function object is a pluggable unit of computation that runs once per
//! simulation cycle and needs to carry small pieces of state between cycles:
//! running averages, iteration counters, published scalar outputs. This crate
//! gives each one a [`FunctionObjectState`] bound to the host registry's
//! shared state dictionary.
//!
//! # Regions
//!
//! The state dictionary is divided by convention:
//!
//! - flat properties live at the top level;
//! - object properties live under `<objectName>/`;
//! - results live under the reserved [`RESULTS_KEY`], flat or per object.
//!
//! Flat entries and object regions share a level. A flat read sees only
//! values there, so an object region never shows up as a flat property or
//! result of the same name.
//!
//! # Design Rules
//!
//! 1. Reads of absent entries return the caller's default, never an error.
//! 2. Reading a stored entry as an incompatible type is a recoverable
//!    [`StateError::TypeMismatch`].
//! 3. Sub-dictionaries are created only when something is written into them.
//! 4. The active flag changes only in [`FunctionObjectState::set_active`];
//!    gating is advisory and never blocks reads or writes.

pub mod config;
pub mod error;
pub mod state;

pub use config::StateConfig;
pub use error::{StateError, StateResult};
pub use state::{FunctionObjectState, RESULTS_KEY};

pub use fos_types::{StateValue, TypeTag, Value};
