//! Value conversions between typed field values and JSON

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use super::error::{Mismatch, Reason};
use super::schema::{JsonKind, Shape};

/// A type that can be stored in a record field
pub trait Wire: Sized {
    const SHAPE: Shape;

    fn from_wire(value: Value) -> Result<Self, Mismatch>;

    fn to_wire(&self) -> Value;
}

fn mismatch(expected: Shape, value: &Value) -> Mismatch {
    Mismatch::shape(expected, JsonKind::of(value))
}

impl Wire for String {
    const SHAPE: Shape = Shape::String;

    fn from_wire(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch(Self::SHAPE, &other)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Wire for bool {
    const SHAPE: Shape = Shape::Boolean;

    fn from_wire(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(Self::SHAPE, &other)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

/// Any JSON number, kept as its wire token so `2` stays `2` and `2.0` stays `2.0`
impl Wire for Number {
    const SHAPE: Shape = Shape::Number;

    fn from_wire(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Number(n) => Ok(n),
            other => Err(mismatch(Self::SHAPE, &other)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::Number(self.clone())
    }
}

macro_rules! impl_wire_integer {
    ($($ty:ty),*) => {
        $(
            impl Wire for $ty {
                const SHAPE: Shape = Shape::Integer;

                fn from_wire(value: Value) -> Result<Self, Mismatch> {
                    let Value::Number(n) = &value else {
                        return Err(mismatch(Self::SHAPE, &value));
                    };
                    let out_of_range = || Mismatch::new(Reason::OutOfRange { expected: Self::SHAPE });
                    if let Some(i) = n.as_i64() {
                        <$ty>::try_from(i).map_err(|_| out_of_range())
                    } else if let Some(u) = n.as_u64() {
                        <$ty>::try_from(u).map_err(|_| out_of_range())
                    } else {
                        // fractional number
                        Err(mismatch(Self::SHAPE, &value))
                    }
                }

                fn to_wire(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_wire_integer!(i32, i64, u16, u32, u64);

/// Raw passthrough
impl Wire for Value {
    const SHAPE: Shape = Shape::Any;

    fn from_wire(value: Value) -> Result<Self, Mismatch> {
        Ok(value)
    }

    fn to_wire(&self) -> Value {
        self.clone()
    }
}

/// Open map with untyped values
impl Wire for Map<String, Value> {
    const SHAPE: Shape = Shape::Map;

    fn from_wire(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(mismatch(Self::SHAPE, &other)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl<T: Wire> Wire for Vec<T> {
    const SHAPE: Shape = Shape::List;

    fn from_wire(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_wire(item).map_err(|m| m.at_index(i)))
                .collect(),
            other => Err(mismatch(Self::SHAPE, &other)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::Array(self.iter().map(Wire::to_wire).collect())
    }
}

/// Open map with typed values
impl<T: Wire> Wire for BTreeMap<String, T> {
    const SHAPE: Shape = Shape::Map;

    fn from_wire(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| match T::from_wire(v) {
                    Ok(v) => Ok((k, v)),
                    Err(m) => Err(m.at_key(&k)),
                })
                .collect(),
            other => Err(mismatch(Self::SHAPE, &other)),
        }
    }

    fn to_wire(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_wire()))
                .collect(),
        )
    }
}
