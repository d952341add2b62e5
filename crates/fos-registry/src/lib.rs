//! Host object registry for function object state.
//!
//! A registry holds the host's named objects (meshes, fields, models) and
//! the state dictionary shared by every function object bound to it. State
//! stores only ask two things of it: "is an object of type `T` present?" and
//! "give me your state dictionary".
//!
//! # Modules
//!
//! - [`error`] -- Error types for registry operations
//! - [`traits`] -- The [`Registry`] trait and the generic [`RegistryExt`] lookups
//! - [`memory`] -- In-memory [`InMemoryRegistry`]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{RegistryError, Result};
pub use memory::InMemoryRegistry;
pub use traits::{Registry, RegistryExt};
