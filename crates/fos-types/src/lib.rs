//! Foundation types for function object state.
//!
//! Every other `fos` crate depends on `fos-types`. It defines what can be
//! stored in a state dictionary and how Rust values move in and out of it.
//!
//! # Key Types
//!
//! - [`Value`] -- Tagged union of every storable value
//! - [`TypeTag`] -- The type name of a stored [`Value`], readable without decoding it
//! - [`Word`] -- A validated identifier used for entry and object names
//! - [`StateValue`] -- Checked conversion between Rust types and [`Value`]

pub mod codec;
pub mod error;
pub mod float;
pub mod value;
pub mod word;

pub use codec::StateValue;
pub use error::TypeError;
pub use value::{TypeTag, Value};
pub use word::{validate_word, Word};
