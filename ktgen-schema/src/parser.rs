//! OpenAPI document parser.
//!
//! This module walks a raw OpenAPI document tree (JSON or YAML) and builds
//! the schema model, resolving each `components.schemas` entry into exactly
//! one typed node.

use crate::error::ParseError;
use crate::types::{
    AllOfDef, AnyOfDef, ArrayDef, EmptyDef, EnumDef, EnumWireType, ObjectDef, OneOfDef,
    OpenApiSpec, PrimitiveDef, PrimitiveType, PropertyKind, PropertyNode, ReferenceDef, SchemaNode,
};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Input document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON document (default).
    #[default]
    Json,
    /// YAML document (`.yaml` / `.yml`).
    Yaml,
}

impl DocumentFormat {
    /// Determines the format from a file path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parses an OpenAPI specification from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or the document is not
/// valid JSON/YAML.
pub fn parse_spec_file(path: &Path) -> Result<OpenApiSpec, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_spec(&text, DocumentFormat::from_path(path))
}

/// Parses an OpenAPI specification from a string.
///
/// # Arguments
/// * `input` - Document content
/// * `format` - Document format
///
/// # Errors
/// Returns `ParseError` if the document is not valid JSON/YAML or a schema
/// entry is not a JSON object.
pub fn parse_spec(input: &str, format: DocumentFormat) -> Result<OpenApiSpec, ParseError> {
    let root: Value = match format {
        DocumentFormat::Json => serde_json::from_str(input)?,
        DocumentFormat::Yaml => serde_yaml::from_str(input)?,
    };
    parse_document(&root)
}

/// Parses an already-deserialized OpenAPI document tree.
///
/// A document without `components.schemas` yields an empty schema mapping,
/// not an error; missing `info.title` / `info.version` yield empty strings.
///
/// # Errors
/// Returns `ParseError` if `components.schemas` is present but not an
/// object, or if a schema entry is not a JSON object.
pub fn parse_document(root: &Value) -> Result<OpenApiSpec, ParseError> {
    let title = root
        .pointer("/info/title")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let version = root
        .pointer("/info/version")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let mut spec = OpenApiSpec::new(title, version);

    if let Some(schemas) = root.pointer("/components/schemas") {
        let map = schemas.as_object().ok_or_else(|| {
            ParseError::invalid_structure("components.schemas is not an object")
        })?;
        for (name, value) in map {
            let node = parse_schema_node(name, value)?;
            debug!(schema = %name, "parsed schema");
            spec.add_schema(node);
        }
    }

    Ok(spec)
}

/// Parses a single schema entry into a typed node.
///
/// Dispatch is by structural shape, first match wins: `anyOf`, `oneOf`,
/// `allOf`, `enum`, `$ref`, object, array, typed primitive, bare empty.
pub fn parse_schema_node(name: &str, value: &Value) -> Result<SchemaNode, ParseError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ParseError::unsupported_shape(name, "schema entry is not a JSON object"))?;

    if let Some(options) = obj.get("anyOf").and_then(Value::as_array) {
        let mut def = AnyOfDef::new(name.to_string());
        def.description = str_field(obj, "description");
        for option in options {
            def.options.push(parse_schema_node("", option)?);
        }
        return Ok(SchemaNode::AnyOf(def));
    }

    if let Some(options) = obj.get("oneOf").and_then(Value::as_array) {
        let mut def = OneOfDef::new(name.to_string());
        def.description = str_field(obj, "description");
        for option in options {
            def.options.push(parse_schema_node("", option)?);
        }
        return Ok(SchemaNode::OneOf(def));
    }

    if let Some(parts) = obj.get("allOf").and_then(Value::as_array) {
        let mut def = AllOfDef::new(name.to_string());
        def.description = str_field(obj, "description");
        for part in parts {
            def.parts.push(parse_schema_node("", part)?);
        }
        return Ok(SchemaNode::AllOf(def));
    }

    if let Some(values) = obj.get("enum").and_then(Value::as_array) {
        let wire_type = obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(EnumWireType::parse)
            .unwrap_or_default();
        let mut def = EnumDef::new(name.to_string(), wire_type);
        def.description = str_field(obj, "description");
        for value in values {
            def.add_value(enum_value_string(value));
        }
        return Ok(SchemaNode::Enum(def));
    }

    if let Some(target) = obj.get("$ref").and_then(Value::as_str) {
        return Ok(SchemaNode::Reference(ReferenceDef::new(
            name.to_string(),
            ref_target(target),
        )));
    }

    let type_name = obj.get("type").and_then(Value::as_str);

    if type_name == Some("object") || obj.contains_key("properties") {
        return parse_object(name, obj);
    }

    if type_name == Some("array") {
        let items = match obj.get("items") {
            Some(items) => parse_property(items)?,
            // Permissive fallback: untyped items decode as strings.
            None => PropertyNode::string(),
        };
        return Ok(SchemaNode::Array(ArrayDef::new(name.to_string(), items)));
    }

    if let Some(type_name) = type_name {
        // Unknown type strings fall back to string rather than erroring.
        let primitive_type =
            PrimitiveType::from_wire_name(type_name).unwrap_or(PrimitiveType::String);
        let mut def = PrimitiveDef::new(name.to_string(), primitive_type);
        def.format = str_field(obj, "format");
        def.description = str_field(obj, "description");
        return Ok(SchemaNode::Primitive(def));
    }

    let mut def = EmptyDef::new(name.to_string());
    def.description = str_field(obj, "description");
    Ok(SchemaNode::Empty(def))
}

/// Parses an object schema, downgrading to `Empty` when no properties and
/// no `additionalProperties` are declared.
fn parse_object(name: &str, obj: &Map<String, Value>) -> Result<SchemaNode, ParseError> {
    let mut def = ObjectDef::new(name.to_string());
    def.description = str_field(obj, "description");

    if let Some(properties) = obj.get("properties").and_then(Value::as_object) {
        for (wire_name, value) in properties {
            def.add_property(wire_name.clone(), parse_property(value)?);
        }
    }

    if let Some(required) = obj.get("required").and_then(Value::as_array) {
        for entry in required {
            if let Some(name) = entry.as_str() {
                def.required.insert(name.to_string());
            }
        }
    }

    def.additional_properties = match obj.get("additionalProperties") {
        Some(Value::Bool(true)) => Some(Box::new(SchemaNode::Empty(EmptyDef::new(String::new())))),
        Some(Value::Bool(false)) | None => None,
        Some(value) => Some(Box::new(parse_schema_node("", value)?)),
    };

    if def.properties.is_empty() && def.additional_properties.is_none() {
        let mut empty = EmptyDef::new(name.to_string());
        empty.description = def.description;
        return Ok(SchemaNode::Empty(empty));
    }

    Ok(SchemaNode::Object(def))
}

/// Parses an object property or array item.
///
/// Follows the schema dispatch but wraps the result in a `PropertyNode`,
/// reading the explicit `nullable` flag (absent = false).
pub fn parse_property(value: &Value) -> Result<PropertyNode, ParseError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ParseError::unsupported_shape("", "property is not a JSON object"))?;

    let nullable = obj.get("nullable").and_then(Value::as_bool).unwrap_or(false);

    if let Some(target) = obj.get("$ref").and_then(Value::as_str) {
        return Ok(PropertyNode {
            kind: PropertyKind::Reference(ref_target(target)),
            nullable,
        });
    }

    let type_name = obj.get("type").and_then(Value::as_str);

    if type_name == Some("array") {
        let items = match obj.get("items") {
            Some(items) => parse_property(items)?,
            None => PropertyNode::string(),
        };
        return Ok(PropertyNode {
            kind: PropertyKind::Array(Box::new(items)),
            nullable,
        });
    }

    if type_name == Some("object") || obj.contains_key("properties") {
        let inline = parse_schema_node("", value)?;
        return Ok(PropertyNode {
            kind: PropertyKind::Inline(Box::new(inline)),
            nullable,
        });
    }

    let primitive_type = type_name
        .and_then(PrimitiveType::from_wire_name)
        .unwrap_or(PrimitiveType::String);
    Ok(PropertyNode {
        kind: PropertyKind::Primitive {
            primitive_type,
            format: str_field(obj, "format"),
            description: str_field(obj, "description"),
        },
        nullable,
    })
}

/// Extracts the referenced schema name: the substring after the last `/`.
fn ref_target(reference: &str) -> String {
    reference
        .rsplit('/')
        .next()
        .unwrap_or(reference)
        .to_string()
}

/// Reads an optional string field from a JSON object.
fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Renders an enum entry verbatim as a string.
fn enum_value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SIMPLE_SPEC: &str = r##"{
        "openapi": "3.0.0",
        "info": { "title": "NEAR RPC", "version": "1.0.0" },
        "components": {
            "schemas": {
                "AccountId": { "type": "string", "description": "Account identifier" },
                "Account": {
                    "type": "object",
                    "properties": {
                        "user_name": { "type": "string" },
                        "balance": { "type": "integer", "format": "int64" }
                    },
                    "required": ["user_name"]
                }
            }
        }
    }"##;

    #[test]
    fn test_parse_simple_spec() {
        let spec = parse_spec(SIMPLE_SPEC, DocumentFormat::Json).expect("Failed to parse spec");

        assert_eq!(spec.title, "NEAR RPC");
        assert_eq!(spec.version, "1.0.0");
        assert_eq!(spec.len(), 2);
        assert!(spec.has_schema("AccountId"));
        assert!(spec.has_schema("Account"));
    }

    #[test]
    fn test_parse_object_schema() {
        let spec = parse_spec(SIMPLE_SPEC, DocumentFormat::Json).expect("Failed to parse spec");

        let SchemaNode::Object(account) = spec.get_schema("Account").unwrap() else {
            panic!("Account should be an object");
        };
        assert_eq!(account.properties.len(), 2);
        assert_eq!(account.properties[0].0, "user_name");
        assert!(account.is_required("user_name"));
        assert!(!account.is_required("balance"));
    }

    #[test]
    fn test_missing_info_yields_empty_strings() {
        let spec = parse_document(&json!({"components": {"schemas": {}}})).unwrap();
        assert_eq!(spec.title, "");
        assert_eq!(spec.version, "");
    }

    #[test]
    fn test_missing_components_is_not_an_error() {
        let spec = parse_document(&json!({"openapi": "3.0.0"})).unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_anyof_takes_precedence_over_type() {
        let node = parse_schema_node(
            "BlockId",
            &json!({
                "type": "string",
                "anyOf": [{"type": "string"}, {"type": "integer", "format": "int64"}]
            }),
        )
        .unwrap();

        let SchemaNode::AnyOf(def) = node else {
            panic!("anyOf must win over type");
        };
        assert_eq!(def.options.len(), 2);
        assert_eq!(def.options[0].name(), "");
    }

    #[test]
    fn test_oneof_dispatch() {
        let node = parse_schema_node(
            "Result",
            &json!({"oneOf": [
                {"type": "object", "properties": {"ok": {"type": "boolean"}}},
                {"type": "object", "properties": {"err": {"type": "string"}}}
            ]}),
        )
        .unwrap();

        let SchemaNode::OneOf(def) = node else {
            panic!("expected OneOf");
        };
        assert_eq!(def.options.len(), 2);
        assert!(def.options[0].is_object());
    }

    #[test]
    fn test_allof_with_ref_parts() {
        let node = parse_schema_node(
            "Combined",
            &json!({"allOf": [
                {"$ref": "#/components/schemas/Base"},
                {"type": "object", "properties": {"name": {"type": "string"}}}
            ]}),
        )
        .unwrap();

        let SchemaNode::AllOf(def) = node else {
            panic!("expected AllOf");
        };
        assert_eq!(def.parts.len(), 2);
        assert!(def.parts[0].is_reference());
        assert!(def.parts[1].is_object());
    }

    #[test]
    fn test_enum_defaults_to_string_type() {
        let node =
            parse_schema_node("Status", &json!({"enum": ["ACTIVE", "near-final"]})).unwrap();

        let SchemaNode::Enum(def) = node else {
            panic!("expected Enum");
        };
        assert_eq!(def.wire_type, EnumWireType::String);
        assert_eq!(def.values, vec!["ACTIVE", "near-final"]);
    }

    #[test]
    fn test_enum_integer_values_kept_verbatim() {
        let node = parse_schema_node("Version", &json!({"type": "integer", "enum": [0, 1]}))
            .unwrap();

        let SchemaNode::Enum(def) = node else {
            panic!("expected Enum");
        };
        assert_eq!(def.wire_type, EnumWireType::Integer);
        assert_eq!(def.values, vec!["0", "1"]);
    }

    #[test]
    fn test_ref_target_extraction() {
        let node =
            parse_schema_node("Alias", &json!({"$ref": "#/components/schemas/AccountId"}))
                .unwrap();

        let SchemaNode::Reference(def) = node else {
            panic!("expected Reference");
        };
        assert_eq!(def.target, "AccountId");
    }

    #[test]
    fn test_empty_object_downgrades_to_empty() {
        let bare = parse_schema_node("Unit", &json!({})).unwrap();
        assert!(bare.is_empty());

        let typed = parse_schema_node("Unit", &json!({"type": "object"})).unwrap();
        assert!(typed.is_empty());

        let no_props = parse_schema_node("Unit", &json!({"type": "object", "properties": {}}))
            .unwrap();
        assert!(no_props.is_empty());
    }

    #[test]
    fn test_description_only_schema_is_empty_with_description() {
        let node =
            parse_schema_node("Opaque", &json!({"description": "reserved for later"})).unwrap();

        let SchemaNode::Empty(def) = node else {
            panic!("expected Empty");
        };
        assert_eq!(def.description.as_deref(), Some("reserved for later"));
    }

    #[test]
    fn test_additional_properties_prevents_empty_downgrade() {
        let node = parse_schema_node(
            "Labels",
            &json!({"type": "object", "additionalProperties": {"type": "string"}}),
        )
        .unwrap();

        let SchemaNode::Object(def) = node else {
            panic!("expected Object");
        };
        assert!(def.additional_properties.is_some());
        assert!(def.properties.is_empty());
    }

    #[test]
    fn test_array_without_items_defaults_to_string() {
        let node = parse_schema_node("Tags", &json!({"type": "array"})).unwrap();

        let SchemaNode::Array(def) = node else {
            panic!("expected Array");
        };
        assert_eq!(def.items, PropertyNode::string());
    }

    #[test]
    fn test_unknown_type_falls_back_to_string_primitive() {
        let node = parse_schema_node("Odd", &json!({"type": "unicorn"})).unwrap();

        let SchemaNode::Primitive(def) = node else {
            panic!("expected Primitive");
        };
        assert_eq!(def.primitive_type, PrimitiveType::String);
    }

    #[test]
    fn test_property_nullable_flag() {
        let prop = parse_property(&json!({"type": "string", "nullable": true})).unwrap();
        assert!(prop.nullable);

        let prop = parse_property(&json!({"type": "string"})).unwrap();
        assert!(!prop.nullable);
    }

    #[test]
    fn test_property_inline_object() {
        let prop = parse_property(&json!({
            "type": "object",
            "properties": {"inner_key": {"type": "boolean"}}
        }))
        .unwrap();

        let PropertyKind::Inline(inline) = &prop.kind else {
            panic!("expected inline object property");
        };
        assert!(inline.is_object());
        assert_eq!(inline.name(), "");
    }

    #[test]
    fn test_property_nested_array() {
        let prop = parse_property(&json!({
            "type": "array",
            "items": {"type": "array", "items": {"type": "integer"}}
        }))
        .unwrap();

        let PropertyKind::Array(items) = &prop.kind else {
            panic!("expected array property");
        };
        let PropertyKind::Array(inner) = &items.kind else {
            panic!("expected nested array items");
        };
        assert!(matches!(
            inner.kind,
            PropertyKind::Primitive {
                primitive_type: PrimitiveType::Integer,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_yaml_document() {
        let yaml = "
info:
  title: NEAR RPC
  version: '1.0'
components:
  schemas:
    CryptoHash:
      type: string
";
        let spec = parse_spec(yaml, DocumentFormat::Yaml).expect("Failed to parse YAML");
        assert_eq!(spec.title, "NEAR RPC");
        assert!(spec.has_schema("CryptoHash"));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("spec.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("spec.yml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("spec.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("spec")),
            DocumentFormat::Json
        );
    }
}
