//! Declaration macros for records and unions.
//!
//! ## record!
//!
//! Declares a struct together with its field table. Each field names its
//! presence mode (`required`, `nullable`, `optional`), Rust name, value type
//! and wire key:
//!
//! ```ignore
//! beamlit::record! {
//!     /// Body of a role update
//!     pub struct UpdateRole {
//!         required role: String = "role",
//!         optional reason: String = "reason",
//!     }
//! }
//! ```
//!
//! `required` fields are stored as `T`, `nullable` as `Option<T>`,
//! `optional` as [`Field<T>`](crate::codec::Field). Every record also gets a
//! public `additional_properties` overflow bag.
//!
//! ## record_union!
//!
//! Declares an enum whose typed variants are tried in declaration order,
//! followed by an implicit `Raw(serde_json::Value)` catch-all.

/// Declare a record type. See the [module docs](crate::codec::macros).
#[macro_export]
macro_rules! record {
    (@type required $ty:ty) => { $ty };
    (@type nullable $ty:ty) => { ::std::option::Option<$ty> };
    (@type optional $ty:ty) => { $crate::codec::Field<$ty> };

    (@presence required) => { $crate::codec::Presence::Required };
    (@presence nullable) => { $crate::codec::Presence::Nullable };
    (@presence optional) => { $crate::codec::Presence::Optional };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $mode:ident $field:ident : $ty:ty = $key:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $crate::record!(@type $mode $ty),
            )*
            /// Wire keys not declared by this record, kept verbatim
            pub additional_properties: $crate::codec::JsonMap,
        }

        impl $crate::codec::Record for $name {
            const SCHEMA: $crate::codec::Schema = $crate::codec::Schema {
                name: stringify!($name),
                fields: &[
                    $(
                        $crate::codec::FieldDescriptor {
                            key: $key,
                            presence: $crate::record!(@presence $mode),
                            shape: <$ty as $crate::codec::Wire>::SHAPE,
                        },
                    )*
                ],
            };

            #[allow(unused_variables)]
            fn read(
                reader: &mut $crate::codec::FieldReader<'_>,
            ) -> ::std::result::Result<Self, $crate::codec::SchemaViolation> {
                Ok(Self {
                    $( $field: reader.$mode($key)?, )*
                    additional_properties: $crate::codec::JsonMap::new(),
                })
            }

            #[allow(unused_variables)]
            fn write(&self, writer: &mut $crate::codec::FieldWriter) {
                $( writer.$mode($key, &self.$field); )*
            }

            fn additional_properties(&self) -> &$crate::codec::JsonMap {
                &self.additional_properties
            }

            fn additional_properties_mut(&mut self) -> &mut $crate::codec::JsonMap {
                &mut self.additional_properties
            }
        }

        impl $crate::codec::Wire for $name {
            const SHAPE: $crate::codec::Shape = $crate::codec::Shape::Record(stringify!($name));

            fn from_wire(
                value: $crate::codec::Value,
            ) -> ::std::result::Result<Self, $crate::codec::Mismatch> {
                $crate::codec::record_from_wire(value)
            }

            fn to_wire(&self) -> $crate::codec::Value {
                $crate::codec::Value::Object($crate::codec::encode(self))
            }
        }
    };
}

/// Declare a union type. See the [module docs](crate::codec::macros).
///
/// A typed variant is tried only when its shape matches the wire value. If
/// some typed variant matched the shape but failed to decode, that failure
/// is returned; the `Raw` fallback only takes values no typed variant
/// recognises.
#[macro_export]
macro_rules! record_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
            /// Value no typed variant recognised
            Raw($crate::codec::Value),
        }

        impl $name {
            pub fn is_raw(&self) -> bool {
                matches!(self, Self::Raw(_))
            }
        }

        impl $crate::codec::Wire for $name {
            const SHAPE: $crate::codec::Shape = $crate::codec::Shape::Union(stringify!($name));

            fn from_wire(
                value: $crate::codec::Value,
            ) -> ::std::result::Result<Self, $crate::codec::Mismatch> {
                let found = $crate::codec::JsonKind::of(&value);
                let mut first_failure: ::std::option::Option<$crate::codec::Mismatch> = None;
                $(
                    if <$ty as $crate::codec::Wire>::SHAPE.accepts(found) {
                        match <$ty as $crate::codec::Wire>::from_wire(value.clone()) {
                            Ok(decoded) => return Ok(Self::$variant(decoded)),
                            Err(mismatch) => {
                                first_failure.get_or_insert(mismatch);
                            }
                        }
                    }
                )+
                match first_failure {
                    Some(mismatch) => Err(mismatch),
                    None => Ok(Self::Raw(value)),
                }
            }

            fn to_wire(&self) -> $crate::codec::Value {
                match self {
                    $( Self::$variant(v) => $crate::codec::Wire::to_wire(v), )+
                    Self::Raw(v) => v.clone(),
                }
            }
        }
    };
}
