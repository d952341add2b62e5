use fos_types::Value;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;

/// A single dictionary entry: either a value or a nested dictionary.
///
/// On disk a value keeps its type tag (`{"scalar": 0.31}`) and a nested
/// dictionary is tagged `dict` (`{"dict": {...}}`), so the two can never be
/// confused even when a dictionary happens to contain a key named `scalar`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntryRepr", into = "EntryRepr")]
pub enum Entry {
    Value(Value),
    Dict(Dictionary),
}

impl Entry {
    /// Returns `true` if this entry is a nested dictionary.
    pub fn is_dict(&self) -> bool {
        matches!(self, Self::Dict(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Dict(_) => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Self::Dict(d) => Some(d),
            Self::Value(_) => None,
        }
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Dictionary> for Entry {
    fn from(dict: Dictionary) -> Self {
        Self::Dict(dict)
    }
}

/// Wire form: the value tags plus `dict`, all externally tagged.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryRepr {
    Bool(bool),
    Label(i64),
    Scalar(#[serde(with = "fos_types::float::scalar")] f64),
    Word(String),
    Vector(#[serde(with = "fos_types::float::vector")] [f64; 3]),
    List(Vec<Value>),
    Dict(Dictionary),
}

impl From<EntryRepr> for Entry {
    fn from(repr: EntryRepr) -> Self {
        match repr {
            EntryRepr::Bool(b) => Self::Value(Value::Bool(b)),
            EntryRepr::Label(n) => Self::Value(Value::Label(n)),
            EntryRepr::Scalar(x) => Self::Value(Value::Scalar(x)),
            EntryRepr::Word(w) => Self::Value(Value::Word(w)),
            EntryRepr::Vector(v) => Self::Value(Value::Vector(v)),
            EntryRepr::List(items) => Self::Value(Value::List(items)),
            EntryRepr::Dict(d) => Self::Dict(d),
        }
    }
}

impl From<Entry> for EntryRepr {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Value(Value::Bool(b)) => Self::Bool(b),
            Entry::Value(Value::Label(n)) => Self::Label(n),
            Entry::Value(Value::Scalar(x)) => Self::Scalar(x),
            Entry::Value(Value::Word(w)) => Self::Word(w),
            Entry::Value(Value::Vector(v)) => Self::Vector(v),
            Entry::Value(Value::List(items)) => Self::List(items),
            Entry::Dict(d) => Self::Dict(d),
        }
    }
}
