//! Typed Model Codec
//!
//! Bidirectional mapping between typed records and JSON objects. Unknown
//! keys survive a decode/encode round trip in each record's overflow bag,
//! and optional fields keep "absent" distinct from "null".

pub mod engine;
pub mod error;
pub mod field;
pub mod macros;
pub mod schema;
pub mod wire;

pub use engine::{
    decode, decode_list, encode, encode_list, record_from_wire, FieldReader, FieldWriter, JsonMap,
    Record,
};
pub use error::{Mismatch, Reason, SchemaViolation};
pub use field::Field;
pub use schema::{FieldDescriptor, JsonKind, Presence, Schema, Shape};
pub use serde_json::{Number, Value};
pub use wire::Wire;
