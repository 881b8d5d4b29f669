//! Schema-driven encode/decode engine
//!
//! Record types only describe their fields (see [`crate::record!`]); the
//! pop-convert-collect loop, the overflow bag and the precedence rules all
//! live here.

use serde_json::{Map, Value};

use super::error::{Mismatch, Reason, SchemaViolation};
use super::field::Field;
use super::schema::{JsonKind, Schema, Shape};
use super::wire::Wire;

/// JSON object as seen on the wire
pub type JsonMap = Map<String, Value>;

/// A typed domain object with a fixed field table and an overflow bag
pub trait Record: Sized {
    const SCHEMA: Schema;

    /// Read every declared field from `reader`, in schema order
    fn read(reader: &mut FieldReader<'_>) -> Result<Self, SchemaViolation>;

    /// Write every declared field to `writer`, in schema order
    fn write(&self, writer: &mut FieldWriter);

    fn additional_properties(&self) -> &JsonMap;

    fn additional_properties_mut(&mut self) -> &mut JsonMap;

    fn decode(map: JsonMap) -> Result<Self, SchemaViolation> {
        decode(map)
    }

    fn encode(&self) -> JsonMap {
        encode(self)
    }

    /// Keys currently held in the overflow bag
    fn additional_keys(&self) -> Vec<&str> {
        self.additional_properties().keys().map(String::as_str).collect()
    }

    fn additional_property(&self, key: &str) -> Option<&Value> {
        self.additional_properties().get(key)
    }

    /// Store an undeclared key. Declared keys are shadowed by their field on
    /// encode, so writing one here has no effect on the wire.
    fn set_additional_property(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.additional_properties_mut().insert(key.into(), value)
    }

    fn remove_additional_property(&mut self, key: &str) -> Option<Value> {
        self.additional_properties_mut().remove(key)
    }
}

/// Pops declared keys out of the wire object being decoded
pub struct FieldReader<'a> {
    record: &'static str,
    map: &'a mut JsonMap,
}

impl FieldReader<'_> {
    fn violation(&self, key: &str, mismatch: Mismatch) -> SchemaViolation {
        mismatch.into_violation(self.record, key)
    }

    pub fn required<T: Wire>(&mut self, key: &str) -> Result<T, SchemaViolation> {
        match self.map.remove(key) {
            None => Err(self.violation(key, Mismatch::new(Reason::Missing))),
            Some(Value::Null) => Err(self.violation(key, Mismatch::new(Reason::UnexpectedNull))),
            Some(value) => T::from_wire(value).map_err(|m| self.violation(key, m)),
        }
    }

    pub fn nullable<T: Wire>(&mut self, key: &str) -> Result<Option<T>, SchemaViolation> {
        match self.map.remove(key) {
            None => Err(self.violation(key, Mismatch::new(Reason::Missing))),
            Some(Value::Null) => Ok(None),
            Some(value) => T::from_wire(value)
                .map(Some)
                .map_err(|m| self.violation(key, m)),
        }
    }

    pub fn optional<T: Wire>(&mut self, key: &str) -> Result<Field<T>, SchemaViolation> {
        match self.map.remove(key) {
            None => Ok(Field::Absent),
            Some(Value::Null) => Ok(Field::Null),
            Some(value) => T::from_wire(value)
                .map(Field::Present)
                .map_err(|m| self.violation(key, m)),
        }
    }
}

/// Collects declared fields into the outgoing wire object
pub struct FieldWriter {
    map: JsonMap,
}

impl FieldWriter {
    pub fn required<T: Wire>(&mut self, key: &str, value: &T) {
        self.map.insert(key.to_string(), value.to_wire());
    }

    pub fn nullable<T: Wire>(&mut self, key: &str, value: &Option<T>) {
        let wire = value.as_ref().map(Wire::to_wire).unwrap_or(Value::Null);
        self.map.insert(key.to_string(), wire);
    }

    pub fn optional<T: Wire>(&mut self, key: &str, value: &Field<T>) {
        match value {
            Field::Absent => {}
            Field::Null => {
                self.map.insert(key.to_string(), Value::Null);
            }
            Field::Present(v) => {
                self.map.insert(key.to_string(), v.to_wire());
            }
        }
    }
}

/// Decode a wire object into `R`.
///
/// Declared keys are consumed in schema order; whatever is left becomes the
/// overflow bag.
pub fn decode<R: Record>(mut map: JsonMap) -> Result<R, SchemaViolation> {
    let mut reader = FieldReader {
        record: R::SCHEMA.name,
        map: &mut map,
    };
    let mut record = R::read(&mut reader)?;
    debug_assert!(R::SCHEMA.keys().all(|key| !map.contains_key(key)));
    *record.additional_properties_mut() = map;
    Ok(record)
}

/// Encode `record` into a wire object.
///
/// Declared fields take precedence over overflow entries of the same key,
/// including fields in the absent state: a stale overflow entry never
/// resurrects a key the record does not hold.
pub fn encode<R: Record>(record: &R) -> JsonMap {
    let mut map = record.additional_properties().clone();
    for key in R::SCHEMA.keys() {
        map.remove(key);
    }
    let mut writer = FieldWriter { map };
    record.write(&mut writer);
    writer.map
}

/// Decode a record nested inside another value
pub fn record_from_wire<R: Record>(value: Value) -> Result<R, Mismatch> {
    match value {
        Value::Object(map) => decode(map).map_err(Mismatch::from_violation),
        other => Err(Mismatch::shape(
            Shape::Record(R::SCHEMA.name),
            JsonKind::of(&other),
        )),
    }
}

/// Decode a JSON array of `R` objects. One bad element fails the whole list.
pub fn decode_list<R: Record>(items: Vec<Value>) -> Result<Vec<R>, SchemaViolation> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            record_from_wire(item).map_err(|m| SchemaViolation {
                record: R::SCHEMA.name,
                field: format!("[{}]{}", i, m.path),
                reason: m.reason,
            })
        })
        .collect()
}

/// Encode a slice of records as a JSON array
pub fn encode_list<R: Record>(records: &[R]) -> Value {
    Value::Array(records.iter().map(|r| Value::Object(encode(r))).collect())
}
