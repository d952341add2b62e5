//! Checked conversion between Rust types and stored [`Value`]s.
//!
//! Reading a value back as a different type than it was written with is a
//! recoverable [`TypeError`], never a panic: state files outlive the code
//! that wrote them.

use crate::error::TypeError;
use crate::value::Value;
use crate::word::Word;

/// A Rust type that can be stored in a state dictionary.
pub trait StateValue: Sized {
    /// Encode into a [`Value`]. Fails only for integers that do not fit a label.
    fn into_value(self) -> Result<Value, TypeError>;

    /// Decode from a stored [`Value`], checking the tag and range.
    fn from_value(value: &Value) -> Result<Self, TypeError>;
}

impl StateValue for Value {
    fn into_value(self) -> Result<Value, TypeError> {
        Ok(self)
    }

    fn from_value(value: &Value) -> Result<Self, TypeError> {
        Ok(value.clone())
    }
}

impl StateValue for bool {
    fn into_value(self) -> Result<Value, TypeError> {
        Ok(Value::Bool(self))
    }

    fn from_value(value: &Value) -> Result<Self, TypeError> {
        value.as_bool()
    }
}

macro_rules! label_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StateValue for $ty {
                fn into_value(self) -> Result<Value, TypeError> {
                    i64::try_from(self)
                        .map(Value::Label)
                        .map_err(|_| TypeError::OutOfRange {
                            value: self as i128,
                            target: "label",
                        })
                }

                fn from_value(value: &Value) -> Result<Self, TypeError> {
                    let n = value.as_label()?;
                    <$ty>::try_from(n).map_err(|_| TypeError::OutOfRange {
                        value: n as i128,
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

label_codec!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl StateValue for f64 {
    fn into_value(self) -> Result<Value, TypeError> {
        Ok(Value::Scalar(self))
    }

    fn from_value(value: &Value) -> Result<Self, TypeError> {
        value.as_scalar()
    }
}

impl StateValue for f32 {
    fn into_value(self) -> Result<Value, TypeError> {
        Ok(Value::Scalar(f64::from(self)))
    }

    /// Non-finite values narrow as-is; finite values beyond `f32::MAX` are
    /// out of range.
    fn from_value(value: &Value) -> Result<Self, TypeError> {
        let x = value.as_scalar()?;
        if x.is_finite() && x.abs() > f64::from(f32::MAX) {
            return Err(TypeError::ScalarOutOfRange {
                value: x.to_string(),
                target: "f32",
            });
        }
        Ok(x as f32)
    }
}

impl StateValue for String {
    fn into_value(self) -> Result<Value, TypeError> {
        Ok(Value::Word(self))
    }

    fn from_value(value: &Value) -> Result<Self, TypeError> {
        value.as_word().map(str::to_owned)
    }
}

impl StateValue for Word {
    fn into_value(self) -> Result<Value, TypeError> {
        Ok(Value::Word(self.into_string()))
    }

    fn from_value(value: &Value) -> Result<Self, TypeError> {
        Word::new(value.as_word()?)
    }
}

impl StateValue for [f64; 3] {
    fn into_value(self) -> Result<Value, TypeError> {
        Ok(Value::Vector(self))
    }

    fn from_value(value: &Value) -> Result<Self, TypeError> {
        value.as_vector()
    }
}

impl<T: StateValue> StateValue for Vec<T> {
    fn into_value(self) -> Result<Value, TypeError> {
        self.into_iter()
            .enumerate()
            .map(|(index, item)| {
                item.into_value().map_err(|e| TypeError::Element {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }

    fn from_value(value: &Value) -> Result<Self, TypeError> {
        value
            .as_list()?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::from_value(item).map_err(|e| TypeError::Element {
                    index,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}
