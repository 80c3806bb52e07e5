//! Protobuf field type to TypeScript type mapping
//!
//! The mapping is intentionally lossy: only strings, 32-bit integers and
//! message references get a precise type. Everything else becomes `any`
//! so that an unusual field never prevents a file from being generated.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::FieldDescriptorProto;
use std::fmt;

/// A TypeScript type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// `string`
    String,
    /// `number`
    Number,
    /// A reference to another generated interface by its bare name
    Named(String),
    /// `any`, the fallback for every unmapped protobuf type
    Any,
    /// `Array<T>`
    Array(Box<TsType>),
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TsType::String => f.write_str("string"),
            TsType::Number => f.write_str("number"),
            TsType::Named(name) => f.write_str(name),
            TsType::Any => f.write_str("any"),
            TsType::Array(inner) => write!(f, "Array<{}>", inner),
        }
    }
}

/// Map a protobuf scalar/message type to a TypeScript type, ignoring the label
pub fn map_proto_type(proto_type: Type, type_name: Option<&str>) -> TsType {
    match proto_type {
        Type::String => TsType::String,
        Type::Int32 => TsType::Number,
        Type::Message => match type_name.map(bare_type_name) {
            Some(name) if !name.is_empty() => TsType::Named(name.to_string()),
            _ => TsType::Any,
        },
        _ => TsType::Any,
    }
}

/// Map a field descriptor, wrapping repeated fields in `Array<...>`
pub fn map_field(field: &FieldDescriptorProto) -> TsType {
    let scalar = map_proto_type(field.r#type(), field.type_name.as_deref());
    if field.label() == Label::Repeated {
        TsType::Array(Box::new(scalar))
    } else {
        scalar
    }
}

/// Render the TypeScript type expression for a field
pub fn map_field_type(field: &FieldDescriptorProto) -> String {
    map_field(field).to_string()
}

/// Last segment of a dotted type name (`.pkg.Outer.Inner` -> `Inner`)
pub fn bare_type_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}
