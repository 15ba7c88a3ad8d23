//! Schema model definitions.
//!
//! This module contains the data structures representing OpenAPI schema
//! nodes: objects, enums, arrays, primitives, unions, intersections,
//! references and empty placeholders.

use std::collections::{HashMap, HashSet};

/// Complete parsed OpenAPI specification.
#[derive(Debug, Clone)]
pub struct OpenApiSpec {
    /// Spec title (`info.title`, empty if absent).
    pub title: String,
    /// Spec version (`info.version`, empty if absent).
    pub version: String,
    /// Schema definitions in document order.
    pub schemas: Vec<SchemaNode>,
    /// Schema lookup map (built during parsing).
    schema_map: HashMap<String, usize>,
}

impl OpenApiSpec {
    /// Creates a new empty specification.
    #[must_use]
    pub fn new(title: String, version: String) -> Self {
        Self {
            title,
            version,
            schemas: Vec::new(),
            schema_map: HashMap::new(),
        }
    }

    /// Adds a schema to the specification.
    pub fn add_schema(&mut self, node: SchemaNode) {
        let name = node.name().to_string();
        let index = self.schemas.len();
        self.schemas.push(node);
        self.schema_map.insert(name, index);
    }

    /// Looks up a schema by name.
    #[must_use]
    pub fn get_schema(&self, name: &str) -> Option<&SchemaNode> {
        self.schema_map.get(name).map(|&idx| &self.schemas[idx])
    }

    /// Returns true if a schema with the given name exists.
    #[must_use]
    pub fn has_schema(&self, name: &str) -> bool {
        self.schema_map.contains_key(name)
    }

    /// Returns the number of schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if the specification contains no schemas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Schema node variants.
///
/// Every variant carries a name; anonymous nodes (inline properties,
/// union options) carry an empty string and take their identity from the
/// parent context.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Object schema with named properties.
    Object(ObjectDef),
    /// Closed set of string constants.
    Enum(EnumDef),
    /// Homogeneous sequence.
    Array(ArrayDef),
    /// Scalar type, optionally refined by a format.
    Primitive(PrimitiveDef),
    /// Permissive union: any subset of the options may match.
    AnyOf(AnyOfDef),
    /// Exclusive union: exactly one option matches.
    OneOf(OneOfDef),
    /// Intersection: all parts merged into one object.
    AllOf(AllOfDef),
    /// Name of another top-level schema.
    Reference(ReferenceDef),
    /// Object schema with no declared shape.
    Empty(EmptyDef),
}

impl SchemaNode {
    /// Returns the name of the schema.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object(o) => &o.name,
            Self::Enum(e) => &e.name,
            Self::Array(a) => &a.name,
            Self::Primitive(p) => &p.name,
            Self::AnyOf(a) => &a.name,
            Self::OneOf(o) => &o.name,
            Self::AllOf(a) => &a.name,
            Self::Reference(r) => &r.name,
            Self::Empty(e) => &e.name,
        }
    }

    /// Returns true if this is an object schema.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns true if this is a reference to another schema.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// Returns true if this is an empty placeholder schema.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

/// Object schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDef {
    /// Schema name ("" for inline objects).
    pub name: String,
    /// Properties keyed by wire name, in document order.
    pub properties: Vec<(String, PropertyNode)>,
    /// Wire names of required properties.
    pub required: HashSet<String>,
    /// Description.
    pub description: Option<String>,
    /// Value schema of `additionalProperties`, if declared.
    pub additional_properties: Option<Box<SchemaNode>>,
}

impl ObjectDef {
    /// Creates a new object definition.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            properties: Vec::new(),
            required: HashSet::new(),
            description: None,
            additional_properties: None,
        }
    }

    /// Adds a property with its wire name.
    pub fn add_property(&mut self, wire_name: String, property: PropertyNode) {
        self.properties.push((wire_name, property));
    }

    /// Returns true if the property with the given wire name is required.
    #[must_use]
    pub fn is_required(&self, wire_name: &str) -> bool {
        self.required.contains(wire_name)
    }
}

/// Enum schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    /// Schema name.
    pub name: String,
    /// Wire values, verbatim from the `enum` array, in document order.
    pub values: Vec<String>,
    /// Underlying wire type.
    pub wire_type: EnumWireType,
    /// Description.
    pub description: Option<String>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: String, wire_type: EnumWireType) -> Self {
        Self {
            name,
            values: Vec::new(),
            wire_type,
            description: None,
        }
    }

    /// Adds a wire value.
    pub fn add_value(&mut self, value: String) {
        self.values.push(value);
    }
}

/// Wire type underlying an enum schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumWireType {
    /// String values (default when `type` is absent).
    #[default]
    String,
    /// Integer values.
    Integer,
}

impl EnumWireType {
    /// Parses an enum wire type from an OpenAPI `type` string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            _ => None,
        }
    }
}

/// Array schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDef {
    /// Schema name ("" for inline arrays).
    pub name: String,
    /// Item schema.
    pub items: PropertyNode,
}

impl ArrayDef {
    /// Creates a new array definition.
    #[must_use]
    pub fn new(name: String, items: PropertyNode) -> Self {
        Self { name, items }
    }
}

/// Primitive schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveDef {
    /// Schema name ("" for inline primitives).
    pub name: String,
    /// Underlying primitive type.
    pub primitive_type: PrimitiveType,
    /// Format refinement (e.g. "int64", "byte", "date-time").
    pub format: Option<String>,
    /// Description.
    pub description: Option<String>,
}

impl PrimitiveDef {
    /// Creates a new primitive definition.
    #[must_use]
    pub fn new(name: String, primitive_type: PrimitiveType) -> Self {
        Self {
            name,
            primitive_type,
            format: None,
            description: None,
        }
    }
}

/// OpenAPI primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// UTF-8 string.
    String,
    /// Integer number.
    Integer,
    /// Floating point number.
    Number,
    /// Boolean.
    Boolean,
}

impl PrimitiveType {
    /// Parses a primitive type from its OpenAPI wire name.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Returns the OpenAPI wire name.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Union definition where a value may match any subset of the options.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyOfDef {
    /// Schema name.
    pub name: String,
    /// Options in document order, parsed anonymously.
    pub options: Vec<SchemaNode>,
    /// Description.
    pub description: Option<String>,
}

impl AnyOfDef {
    /// Creates a new anyOf definition.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            options: Vec::new(),
            description: None,
        }
    }
}

/// Union definition where a value matches exactly one option.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOfDef {
    /// Schema name.
    pub name: String,
    /// Options in document order, parsed anonymously.
    pub options: Vec<SchemaNode>,
    /// Description.
    pub description: Option<String>,
}

impl OneOfDef {
    /// Creates a new oneOf definition.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            options: Vec::new(),
            description: None,
        }
    }
}

/// Intersection definition merging all parts into one object.
#[derive(Debug, Clone, PartialEq)]
pub struct AllOfDef {
    /// Schema name.
    pub name: String,
    /// Parts in document order; may be references or inline objects.
    pub parts: Vec<SchemaNode>,
    /// Description.
    pub description: Option<String>,
}

impl AllOfDef {
    /// Creates a new allOf definition.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            parts: Vec::new(),
            description: None,
        }
    }
}

/// Reference to another top-level schema by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDef {
    /// Schema name ("" for inline references).
    pub name: String,
    /// Name of the referenced schema (last segment of the `$ref` path).
    pub target: String,
}

impl ReferenceDef {
    /// Creates a new reference definition.
    #[must_use]
    pub fn new(name: String, target: String) -> Self {
        Self { name, target }
    }
}

/// Object schema with no declared properties and no `additionalProperties`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyDef {
    /// Schema name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

impl EmptyDef {
    /// Creates a new empty definition.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            description: None,
        }
    }
}

/// Property attached to an object's property map or an array's items slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    /// Shape of the property.
    pub kind: PropertyKind,
    /// Explicit `nullable` flag (independent of `required` membership).
    pub nullable: bool,
}

impl PropertyNode {
    /// Creates a non-nullable property.
    #[must_use]
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Creates a non-nullable string primitive property.
    ///
    /// Used as the permissive fallback for arrays without `items`.
    #[must_use]
    pub fn string() -> Self {
        Self::new(PropertyKind::Primitive {
            primitive_type: PrimitiveType::String,
            format: None,
            description: None,
        })
    }
}

/// Property shape variants.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Scalar property.
    Primitive {
        /// Underlying primitive type.
        primitive_type: PrimitiveType,
        /// Format refinement.
        format: Option<String>,
        /// Description.
        description: Option<String>,
    },
    /// Sequence property with recursively parsed items.
    Array(Box<PropertyNode>),
    /// Inline object (or empty) schema, hoisted at generation time.
    Inline(Box<SchemaNode>),
    /// Reference to a named top-level schema.
    Reference(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_schema_lookup() {
        let mut spec = OpenApiSpec::new("test".to_string(), "1.0".to_string());
        spec.add_schema(SchemaNode::Empty(EmptyDef::new("Unit".to_string())));

        assert!(spec.has_schema("Unit"));
        assert!(!spec.has_schema("Missing"));
        assert!(spec.get_schema("Unit").is_some());
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn test_spec_preserves_insertion_order() {
        let mut spec = OpenApiSpec::new(String::new(), String::new());
        spec.add_schema(SchemaNode::Empty(EmptyDef::new("B".to_string())));
        spec.add_schema(SchemaNode::Empty(EmptyDef::new("A".to_string())));

        let names: Vec<&str> = spec.schemas.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_primitive_type_wire_name_roundtrip() {
        for prim in [
            PrimitiveType::String,
            PrimitiveType::Integer,
            PrimitiveType::Number,
            PrimitiveType::Boolean,
        ] {
            assert_eq!(PrimitiveType::from_wire_name(prim.wire_name()), Some(prim));
        }
        assert_eq!(PrimitiveType::from_wire_name("null"), None);
    }

    #[test]
    fn test_object_required() {
        let mut obj = ObjectDef::new("Account".to_string());
        obj.add_property("user_name".to_string(), PropertyNode::string());
        obj.required.insert("user_name".to_string());

        assert!(obj.is_required("user_name"));
        assert!(!obj.is_required("other"));
    }

    #[test]
    fn test_enum_wire_type_parse() {
        assert_eq!(EnumWireType::parse("string"), Some(EnumWireType::String));
        assert_eq!(EnumWireType::parse("integer"), Some(EnumWireType::Integer));
        assert_eq!(EnumWireType::parse("object"), None);
        assert_eq!(EnumWireType::default(), EnumWireType::String);
    }

    #[test]
    fn test_schema_node_predicates() {
        let obj = SchemaNode::Object(ObjectDef::new("A".to_string()));
        assert!(obj.is_object());
        assert!(!obj.is_reference());

        let re = SchemaNode::Reference(ReferenceDef::new(String::new(), "B".to_string()));
        assert!(re.is_reference());
        assert_eq!(re.name(), "");
    }
}
