//! Object, intersection and permissive-union code generation.
//!
//! Objects become `data class` declarations; inline nested objects are
//! hoisted into auxiliary named types in the same file. `allOf` and
//! `anyOf` schemas are flattened into object definitions first and then
//! emitted through the same path.

use crate::error::CodegenError;
use crate::kotlin::types::{needs_hoist, property_type, resolve};
use crate::kotlin::{KotlinFile, kdoc};
use crate::naming::{escape_identifier, snake_to_camel, to_type_name};
use ktgen_schema::{
    AllOfDef, AnyOfDef, EmptyDef, EnumWireType, ObjectDef, OpenApiSpec, PrimitiveType,
    PropertyKind, PropertyNode, SchemaNode,
};
use tracing::warn;

/// Generator for object-shaped declarations.
pub struct ObjectGenerator<'a> {
    spec: &'a OpenApiSpec,
}

impl<'a> ObjectGenerator<'a> {
    /// Creates a new object generator.
    #[must_use]
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self { spec }
    }

    /// Emits a data class for an object definition, followed by any
    /// auxiliary types hoisted out of inline properties.
    ///
    /// An object with no declared properties (only `additionalProperties`)
    /// is emitted as a value-class wrapper over an opaque JSON element.
    ///
    /// # Errors
    /// Returns `MissingReference` if a property references an absent schema.
    pub fn generate(
        &self,
        type_name: &str,
        def: &ObjectDef,
        file: &mut KotlinFile,
    ) -> Result<(), CodegenError> {
        self.emit(type_name, def, None, file)
    }

    /// Emits a data class implementing a sealed interface, used for union
    /// variants.
    pub(crate) fn generate_variant(
        &self,
        type_name: &str,
        def: &ObjectDef,
        supertype: &str,
        file: &mut KotlinFile,
    ) -> Result<(), CodegenError> {
        self.emit(type_name, def, Some(supertype), file)
    }

    fn emit(
        &self,
        type_name: &str,
        def: &ObjectDef,
        supertype: Option<&str>,
        file: &mut KotlinFile,
    ) -> Result<(), CodegenError> {
        let suffix = supertype.map_or(String::new(), |parent| format!(" : {parent}"));

        if def.properties.is_empty() {
            if let Some(parent) = supertype {
                // A shapeless variant carries no decodable fields; it acts
                // as a zero-field marker inside the union.
                file.import("kotlinx.serialization.Serializable");
                file.push(&kdoc(def.description.as_deref()));
                file.push_line("@Serializable");
                file.push_line(&format!("data object {type_name} : {parent}"));
                return Ok(());
            }
            file.import("kotlinx.serialization.Serializable");
            file.import("kotlinx.serialization.json.JsonElement");
            file.push(&kdoc(def.description.as_deref()));
            file.push_line("@Serializable");
            file.push_line("@JvmInline");
            file.push_line(&format!("value class {type_name}(val value: JsonElement)"));
            return Ok(());
        }

        let mut hoisted: Vec<(String, SchemaNode)> = Vec::new();
        let mut fields = String::new();

        for (wire_name, property) in &def.properties {
            let camel = snake_to_camel(wire_name);
            let ident = escape_identifier(&camel);
            let aux_name = format!("{type_name}{}", to_type_name(wire_name));

            let base = property_type(self.spec, property, &aux_name)?;
            if base.contains("JsonElement") {
                file.import("kotlinx.serialization.json.JsonElement");
            }

            if let Some(inline) = inline_node(property) {
                if needs_hoist(inline) {
                    hoisted.push((aux_name, inline.clone()));
                }
            }

            if let Some(description) = property_description(property) {
                fields.push_str(&format!("    /** {description} */\n"));
            }
            if camel != *wire_name {
                file.import("kotlinx.serialization.SerialName");
                fields.push_str(&format!("    @SerialName(\"{wire_name}\")\n"));
            }

            let required = def.is_required(wire_name);
            if required && !property.nullable {
                fields.push_str(&format!("    val {ident}: {base},\n"));
            } else if required {
                // Present on the wire but may carry an explicit null.
                fields.push_str(&format!("    val {ident}: {base}?,\n"));
            } else {
                fields.push_str(&format!("    val {ident}: {base}? = null,\n"));
            }
        }

        file.import("kotlinx.serialization.Serializable");
        file.push(&kdoc(def.description.as_deref()));
        file.push_line("@Serializable");
        file.push_line(&format!("data class {type_name}("));
        file.push(&fields);
        file.push_line(&format!("){suffix}"));

        for (aux_name, node) in hoisted {
            file.push("\n");
            match node {
                SchemaNode::Object(object) => self.generate(&aux_name, &object, file)?,
                SchemaNode::Empty(empty) => self.generate_empty(&aux_name, &empty, file),
                other => {
                    return Err(CodegenError::generation(format!(
                        "cannot hoist non-object schema into '{aux_name}': {other:?}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Emits a zero-field singleton that serializes as `{}` on the wire.
    pub fn generate_empty(&self, type_name: &str, def: &EmptyDef, file: &mut KotlinFile) {
        file.import("kotlinx.serialization.Serializable");
        file.push(&kdoc(def.description.as_deref()));
        file.push_line("@Serializable");
        file.push_line(&format!("data object {type_name}"));
    }

    /// Emits a zero-field marker variant of a sealed interface.
    pub(crate) fn generate_marker(
        &self,
        type_name: &str,
        description: Option<&str>,
        supertype: &str,
        file: &mut KotlinFile,
    ) {
        file.import("kotlinx.serialization.Serializable");
        file.push(&kdoc(description));
        file.push_line("@Serializable");
        file.push_line(&format!("data object {type_name} : {supertype}"));
    }

    /// Flattens an `anyOf` union into a single object where every merged
    /// field is optional.
    ///
    /// Options resolving to objects contribute their property sets (first
    /// occurrence wins on wire-name collision); primitive options become
    /// fields named after their base wire type. The merge is lossy by
    /// design: any subset of the merged fields may be populated.
    ///
    /// # Errors
    /// Returns `MissingReference` if an option references an absent schema.
    pub fn flatten_any_of(&self, def: &AnyOfDef) -> Result<ObjectDef, CodegenError> {
        let mut merged = ObjectDef::new(def.name.clone());
        merged.description = def.description.clone();
        self.collect_any_of_options(&def.options, &mut merged)?;
        Ok(merged)
    }

    fn collect_any_of_options(
        &self,
        options: &[SchemaNode],
        merged: &mut ObjectDef,
    ) -> Result<(), CodegenError> {
        for option in options {
            let resolved = resolve(self.spec, option)?;
            match resolved {
                SchemaNode::Object(object) => {
                    for (wire_name, property) in &object.properties {
                        push_if_absent(merged, wire_name, property.clone());
                    }
                }
                SchemaNode::Empty(_) => {}
                SchemaNode::Primitive(primitive) => {
                    let property = PropertyNode::new(PropertyKind::Primitive {
                        primitive_type: primitive.primitive_type,
                        format: primitive.format.clone(),
                        description: primitive.description.clone(),
                    });
                    push_if_absent(merged, primitive.primitive_type.wire_name(), property);
                }
                SchemaNode::Enum(en) => {
                    let primitive_type = match en.wire_type {
                        EnumWireType::String => PrimitiveType::String,
                        EnumWireType::Integer => PrimitiveType::Integer,
                    };
                    let property = PropertyNode::new(PropertyKind::Primitive {
                        primitive_type,
                        format: None,
                        description: en.description.clone(),
                    });
                    push_if_absent(merged, primitive_type.wire_name(), property);
                }
                SchemaNode::Array(array) => {
                    let property =
                        PropertyNode::new(PropertyKind::Array(Box::new(array.items.clone())));
                    push_if_absent(merged, "array", property);
                }
                SchemaNode::AnyOf(inner) => {
                    self.collect_any_of_options(&inner.options, merged)?;
                }
                SchemaNode::AllOf(inner) => {
                    let inner_merged = self.merge_all_of(inner)?;
                    for (wire_name, property) in &inner_merged.properties {
                        push_if_absent(merged, wire_name, property.clone());
                    }
                }
                SchemaNode::OneOf(inner) => {
                    warn!(
                        union = %inner.name,
                        "skipping oneOf option inside anyOf flattening"
                    );
                }
                SchemaNode::Reference(_) => unreachable!("references resolved above"),
            }
        }
        Ok(())
    }

    /// Merges all parts of an `allOf` intersection into one object.
    ///
    /// Parts are resolved through the schema mapping (recursively for
    /// nested intersections) and merged in declaration order; later parts
    /// override earlier ones on wire-name collision. A field ends up
    /// required only if every part declaring it marks it required.
    ///
    /// # Errors
    /// Returns `MissingReference` if a part references an absent schema.
    pub fn merge_all_of(&self, def: &AllOfDef) -> Result<ObjectDef, CodegenError> {
        // (wire name, property, required in every declaring part)
        let mut fields: Vec<(String, PropertyNode, bool)> = Vec::new();
        self.collect_all_of_parts(&def.parts, &mut fields)?;

        let mut merged = ObjectDef::new(def.name.clone());
        merged.description = def.description.clone();
        for (wire_name, property, required) in fields {
            if required {
                merged.required.insert(wire_name.clone());
            }
            merged.add_property(wire_name, property);
        }
        Ok(merged)
    }

    fn collect_all_of_parts(
        &self,
        parts: &[SchemaNode],
        fields: &mut Vec<(String, PropertyNode, bool)>,
    ) -> Result<(), CodegenError> {
        for part in parts {
            let resolved = resolve(self.spec, part)?;
            match resolved {
                SchemaNode::Object(object) => {
                    for (wire_name, property) in &object.properties {
                        let required = object.is_required(wire_name);
                        if let Some(existing) =
                            fields.iter_mut().find(|(name, _, _)| name == wire_name)
                        {
                            existing.1 = property.clone();
                            existing.2 = existing.2 && required;
                        } else {
                            fields.push((wire_name.clone(), property.clone(), required));
                        }
                    }
                }
                SchemaNode::Empty(_) => {}
                SchemaNode::AllOf(inner) => {
                    self.collect_all_of_parts(&inner.parts, fields)?;
                }
                other => {
                    warn!(part = %other.name(), "skipping non-object allOf part");
                }
            }
        }
        Ok(())
    }
}

/// Finds the inline schema reachable through a property, descending
/// through array wrappers.
fn inline_node(property: &PropertyNode) -> Option<&SchemaNode> {
    match &property.kind {
        PropertyKind::Inline(node) => Some(node),
        PropertyKind::Array(items) => inline_node(items),
        _ => None,
    }
}

/// Pulls a one-line description off a primitive property.
fn property_description(property: &PropertyNode) -> Option<&str> {
    match &property.kind {
        PropertyKind::Primitive {
            description: Some(description),
            ..
        } if !description.is_empty() && !description.contains('\n') => Some(description),
        _ => None,
    }
}

fn push_if_absent(merged: &mut ObjectDef, wire_name: &str, property: PropertyNode) {
    if !merged.properties.iter().any(|(name, _)| name == wire_name) {
        merged.add_property(wire_name.to_string(), property);
    }
}
