//! Wire form for floating-point payloads.
//!
//! JSON has no NaN or infinity, and `serde_json` writes them as `null`, which
//! then fails to read back as `f64`. Finite numbers are written as plain
//! numbers; non-finite ones as the strings `"nan"`, `"inf"` and `"-inf"`.
//! A `null` reads as NaN so that files written before this form existed
//! still load.
//!
//! Use through `#[serde(with = "fos_types::float::scalar")]` on `f64` fields
//! and `#[serde(with = "fos_types::float::vector")]` on `[f64; 3]` fields.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

const NAN: &str = "nan";
const INF: &str = "inf";
const NEG_INF: &str = "-inf";

/// An `f64` with the non-finite wire form.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Float(f64);

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let x = self.0;
        if x.is_nan() {
            serializer.serialize_str(NAN)
        } else if x == f64::INFINITY {
            serializer.serialize_str(INF)
        } else if x == f64::NEG_INFINITY {
            serializer.serialize_str(NEG_INF)
        } else {
            serializer.serialize_f64(x)
        }
    }
}

impl<'de> Deserialize<'de> for Float {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FloatVisitor).map(Float)
    }
}

struct FloatVisitor;

impl<'de> Visitor<'de> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or one of \"nan\", \"inf\", \"-inf\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v {
            NAN => Ok(f64::NAN),
            INF => Ok(f64::INFINITY),
            NEG_INF => Ok(f64::NEG_INFINITY),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(f64::NAN)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(f64::NAN)
    }
}

/// `#[serde(with)]` helpers for a single `f64`.
pub mod scalar {
    use super::*;

    pub fn serialize<S: Serializer>(x: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        Float(*x).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Float::deserialize(deserializer).map(|f| f.0)
    }
}

/// `#[serde(with)]` helpers for a `[f64; 3]`.
pub mod vector {
    use super::*;

    pub fn serialize<S: Serializer>(v: &[f64; 3], serializer: S) -> Result<S::Ok, S::Error> {
        v.map(Float).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 3], D::Error> {
        <[Float; 3]>::deserialize(deserializer).map(|v| v.map(|f| f.0))
    }
}
