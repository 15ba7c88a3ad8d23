//! Property type resolution.
//!
//! Maps schema properties onto Kotlin types, following references through
//! the full schema mapping. Referenced schemas keep their own names as
//! types; top-level arrays are never emitted and resolve inline to
//! `List<T>` wherever referenced.

use crate::error::CodegenError;
use ktgen_schema::{OpenApiSpec, PrimitiveType, PropertyKind, PropertyNode, SchemaNode};
use std::collections::HashSet;

/// Returns the Kotlin type for a primitive with an optional format.
#[must_use]
pub fn primitive_type(prim: PrimitiveType, format: Option<&str>) -> &'static str {
    match prim {
        PrimitiveType::String => match format {
            Some("binary") => "ByteArray",
            // "byte" stays base64 text; date formats are not parsed.
            _ => "String",
        },
        PrimitiveType::Integer => match format {
            Some("int64") => "Long",
            _ => "Int",
        },
        PrimitiveType::Number => match format {
            Some("float") => "Float",
            _ => "Double",
        },
        PrimitiveType::Boolean => "Boolean",
    }
}

/// Returns true when an inline property node must be hoisted into its own
/// auxiliary named type.
///
/// Objects with declared properties and empty placeholders are hoisted;
/// shapeless objects (only `additionalProperties`) stay opaque.
#[must_use]
pub fn needs_hoist(node: &SchemaNode) -> bool {
    match node {
        SchemaNode::Object(def) => !def.properties.is_empty(),
        SchemaNode::Empty(_) => true,
        _ => false,
    }
}

/// Resolves the Kotlin type of a property.
///
/// `hoisted_name` is the auxiliary type name assigned to an inline object
/// reachable through this property (the caller emits that type separately).
///
/// # Errors
/// Returns `MissingReference` if a `$ref` target is absent from the schema
/// mapping, or `CircularReference` for self-referential alias chains.
pub fn property_type(
    spec: &OpenApiSpec,
    property: &PropertyNode,
    hoisted_name: &str,
) -> Result<String, CodegenError> {
    match &property.kind {
        PropertyKind::Primitive {
            primitive_type: prim,
            format,
            ..
        } => Ok(primitive_type(*prim, format.as_deref()).to_string()),
        PropertyKind::Array(items) => {
            let inner = property_type(spec, items, hoisted_name)?;
            let inner = if items.nullable {
                format!("{inner}?")
            } else {
                inner
            };
            Ok(format!("List<{inner}>"))
        }
        PropertyKind::Inline(node) => {
            if needs_hoist(node) {
                Ok(hoisted_name.to_string())
            } else {
                Ok("JsonElement".to_string())
            }
        }
        PropertyKind::Reference(target) => reference_type(spec, target),
    }
}

/// Resolves the Kotlin type a `$ref` target maps to.
///
/// Reference chains are followed; a target that is itself a top-level
/// array resolves to `List<T>` since arrays are never emitted as files.
pub fn reference_type(spec: &OpenApiSpec, target: &str) -> Result<String, CodegenError> {
    let node = resolve_node(spec, target)?;
    match node {
        SchemaNode::Array(array) => {
            // Inline items of a referenced array have no file to host a
            // hoisted type, so they stay opaque.
            let item = match &array.items.kind {
                PropertyKind::Inline(_) => "JsonElement".to_string(),
                _ => property_type(spec, &array.items, "JsonElement")?,
            };
            let item = if array.items.nullable {
                format!("{item}?")
            } else {
                item
            };
            Ok(format!("List<{item}>"))
        }
        other => Ok(other.name().to_string()),
    }
}

/// Follows a reference chain to the schema it finally names.
///
/// # Errors
/// Returns `MissingReference` if any link is absent from the schema
/// mapping, or `CircularReference` if the chain loops.
pub fn resolve_node<'a>(
    spec: &'a OpenApiSpec,
    target: &str,
) -> Result<&'a SchemaNode, CodegenError> {
    let mut seen = HashSet::new();
    let mut current = target.to_string();

    loop {
        if !seen.insert(current.clone()) {
            return Err(CodegenError::CircularReference {
                path: format!("{target} -> {current}"),
            });
        }
        let node = spec
            .get_schema(&current)
            .ok_or_else(|| CodegenError::missing_reference(&current))?;
        match node {
            SchemaNode::Reference(reference) => current = reference.target.clone(),
            other => return Ok(other),
        }
    }
}

/// Resolves a schema node in place, following it if it is a reference.
pub fn resolve<'a>(
    spec: &'a OpenApiSpec,
    node: &'a SchemaNode,
) -> Result<&'a SchemaNode, CodegenError> {
    match node {
        SchemaNode::Reference(reference) => resolve_node(spec, &reference.target),
        other => Ok(other),
    }
}
