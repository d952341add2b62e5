//! Ordered hierarchical dictionary for function object state.
//!
//! A [`Dictionary`] maps names to either a [`Value`](fos_types::Value) or a
//! nested [`Dictionary`], preserving insertion order. It is the document that
//! state stores read and write; the stores never own it.
//!
//! # Modules
//!
//! - [`error`] -- Error types for dictionary operations
//! - [`entry`] -- [`Entry`], a value or a sub-dictionary
//! - [`dictionary`] -- The [`Dictionary`] itself
//! - [`shared`] -- [`SharedDictionary`], a cloneable handle to one document
//! - [`file`] -- [`DictionaryFile`], JSON load/save for hosts
//!
//! # Design Rules
//!
//! 1. Iteration order is insertion order. Overwriting a key keeps its position.
//! 2. Sub-dictionaries are created only by explicit `*_or_add` calls.
//! 3. A key holds either a value or a sub-dictionary, never both.

pub mod dictionary;
pub mod entry;
pub mod error;
pub mod file;
pub mod shared;

pub use dictionary::Dictionary;
pub use entry::Entry;
pub use error::{DictError, DictResult};
pub use file::{DictionaryFile, DEFAULT_FILE_NAME};
pub use shared::SharedDictionary;
