//! # ktgen Schema
//!
//! OpenAPI schema parser and type model.
//!
//! This crate provides:
//! - Document parsing from OpenAPI specifications (JSON or YAML)
//! - Typed schema nodes for objects, enums, arrays, primitives, unions,
//!   intersections, references and empty placeholders
//! - An ordered, immutable schema model consumed by the code generator

pub mod error;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use parser::{
    DocumentFormat, parse_document, parse_property, parse_schema_node, parse_spec, parse_spec_file,
};
pub use types::{
    AllOfDef, AnyOfDef, ArrayDef, EmptyDef, EnumDef, EnumWireType, ObjectDef, OneOfDef,
    OpenApiSpec, PrimitiveDef, PrimitiveType, PropertyKind, PropertyNode, ReferenceDef, SchemaNode,
};
