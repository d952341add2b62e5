//! Stored values and their type tags.
//!
//! A state dictionary holds [`Value`]s, never arbitrary Rust types. Each
//! value carries its own [`TypeTag`] so that generic consumers can ask what
//! was stored without knowing the Rust type ahead of time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Type name of a stored [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Bool,
    Label,
    Scalar,
    Word,
    Vector,
    List,
}

impl TypeTag {
    /// All tags, in declaration order.
    pub const ALL: [TypeTag; 6] = [
        Self::Bool,
        Self::Label,
        Self::Scalar,
        Self::Word,
        Self::Vector,
        Self::List,
    ];

    /// The canonical lowercase name of this tag.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Label => "label",
            Self::Scalar => "scalar",
            Self::Word => "word",
            Self::Vector => "vector",
            Self::List => "list",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| TypeError::InvalidWord {
                word: s.to_string(),
                reason: "unknown type tag".into(),
            })
    }
}

/// A value stored in a state dictionary.
///
/// Serialized externally tagged by type, e.g. `{"scalar": 0.31}` or
/// `{"vector": [1.0, 0.0, 0.0]}`, so the tag survives a round trip through
/// a file even where the payloads look alike (`1` vs `1.0`). Non-finite
/// scalars are written as `"nan"`, `"inf"` or `"-inf"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    Label(i64),
    Scalar(#[serde(with = "crate::float::scalar")] f64),
    Word(String),
    Vector(#[serde(with = "crate::float::vector")] [f64; 3]),
    List(Vec<Value>),
}

impl Value {
    /// The type tag of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => TypeTag::Bool,
            Self::Label(_) => TypeTag::Label,
            Self::Scalar(_) => TypeTag::Scalar,
            Self::Word(_) => TypeTag::Word,
            Self::Vector(_) => TypeTag::Vector,
            Self::List(_) => TypeTag::List,
        }
    }

    fn mismatch(&self, expected: TypeTag) -> TypeError {
        TypeError::Mismatch {
            expected,
            found: self.type_tag(),
        }
    }

    pub fn as_bool(&self) -> Result<bool, TypeError> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(other.mismatch(TypeTag::Bool)),
        }
    }

    pub fn as_label(&self) -> Result<i64, TypeError> {
        match self {
            Self::Label(n) => Ok(*n),
            other => Err(other.mismatch(TypeTag::Label)),
        }
    }

    /// Read as a scalar. A stored label widens to a scalar; nothing else
    /// converts.
    pub fn as_scalar(&self) -> Result<f64, TypeError> {
        match self {
            Self::Scalar(x) => Ok(*x),
            Self::Label(n) => Ok(*n as f64),
            other => Err(other.mismatch(TypeTag::Scalar)),
        }
    }

    pub fn as_word(&self) -> Result<&str, TypeError> {
        match self {
            Self::Word(w) => Ok(w),
            other => Err(other.mismatch(TypeTag::Word)),
        }
    }

    pub fn as_vector(&self) -> Result<[f64; 3], TypeError> {
        match self {
            Self::Vector(v) => Ok(*v),
            other => Err(other.mismatch(TypeTag::Vector)),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], TypeError> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(other.mismatch(TypeTag::List)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Label(n) => write!(f, "{n}"),
            Self::Scalar(x) => write!(f, "{x}"),
            Self::Word(w) => f.write_str(w),
            Self::Vector([x, y, z]) => write!(f, "({x} {y} {z})"),
            Self::List(items) => {
                write!(f, "{}(", items.len())?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}
