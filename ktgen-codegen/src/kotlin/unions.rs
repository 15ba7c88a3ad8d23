//! Exclusive union (oneOf) code generation.
//!
//! A `oneOf` schema becomes a sealed interface with one variant type per
//! option, named by a 1-based ordinal. The schema declares no
//! discriminant, so the emitted serializer decodes by trying each variant
//! in declared order and accepting the first structural match; overlap
//! between variant shapes resolves to the earliest declared variant.

use crate::error::CodegenError;
use crate::kotlin::objects::ObjectGenerator;
use crate::kotlin::types::resolve;
use crate::kotlin::{KotlinFile, kdoc};
use ktgen_schema::{OneOfDef, OpenApiSpec, SchemaNode};

/// Generator for sealed union declarations.
pub struct UnionGenerator<'a> {
    spec: &'a OpenApiSpec,
}

impl<'a> UnionGenerator<'a> {
    /// Creates a new union generator.
    #[must_use]
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self { spec }
    }

    /// Emits the sealed interface, its variants and the trial-order
    /// serializer.
    ///
    /// # Errors
    /// Returns `MissingReference` if an option references an absent schema.
    pub fn generate(
        &self,
        type_name: &str,
        def: &OneOfDef,
        file: &mut KotlinFile,
    ) -> Result<(), CodegenError> {
        file.import("kotlinx.serialization.KSerializer");
        file.import("kotlinx.serialization.SerializationException");
        file.import("kotlinx.serialization.Serializable");
        file.import("kotlinx.serialization.descriptors.SerialDescriptor");
        file.import("kotlinx.serialization.descriptors.buildClassSerialDescriptor");
        file.import("kotlinx.serialization.encoding.Decoder");
        file.import("kotlinx.serialization.encoding.Encoder");
        file.import("kotlinx.serialization.json.JsonDecoder");

        file.push(&kdoc(def.description.as_deref()));
        file.push_line(&format!(
            "@Serializable(with = {type_name}Serializer::class)"
        ));
        file.push_line(&format!("sealed interface {type_name}"));

        let objects = ObjectGenerator::new(self.spec);
        let mut variants = Vec::with_capacity(def.options.len());

        for (index, option) in def.options.iter().enumerate() {
            let variant = format!("{type_name}Option{}", index + 1);
            let resolved = resolve(self.spec, option)?;
            file.push("\n");
            match resolved {
                SchemaNode::Object(object) => {
                    objects.generate_variant(&variant, object, type_name, file)?;
                }
                SchemaNode::AllOf(all_of) => {
                    let merged = objects.merge_all_of(all_of)?;
                    objects.generate_variant(&variant, &merged, type_name, file)?;
                }
                SchemaNode::AnyOf(any_of) => {
                    let merged = objects.flatten_any_of(any_of)?;
                    objects.generate_variant(&variant, &merged, type_name, file)?;
                }
                SchemaNode::Empty(empty) => {
                    objects.generate_marker(&variant, empty.description.as_deref(), type_name, file);
                }
                // Non-object options become zero-field markers.
                other => {
                    objects.generate_marker(&variant, description_of(other), type_name, file);
                }
            }
            variants.push(variant);
        }

        file.push("\n");
        self.emit_serializer(type_name, &variants, file);
        Ok(())
    }

    fn emit_serializer(&self, type_name: &str, variants: &[String], file: &mut KotlinFile) {
        file.push_line(&format!(
            "object {type_name}Serializer : KSerializer<{type_name}> {{"
        ));

        file.push_line(&format!(
            "    private val variants: List<KSerializer<out {type_name}>> = listOf("
        ));
        for variant in variants {
            file.push_line(&format!("        {variant}.serializer(),"));
        }
        file.push_line("    )");
        file.push("\n");

        file.push_line(&format!(
            "    override val descriptor: SerialDescriptor = buildClassSerialDescriptor(\"{type_name}\")"
        ));
        file.push("\n");

        file.push_line(&format!(
            "    override fun deserialize(decoder: Decoder): {type_name} {{"
        ));
        file.push_line("        val input = decoder as? JsonDecoder");
        file.push_line(&format!(
            "            ?: throw SerializationException(\"{type_name} can only be decoded from JSON\")"
        ));
        file.push_line("        val element = input.decodeJsonElement()");
        file.push_line("        for (variant in variants) {");
        file.push_line("            try {");
        file.push_line("                return input.json.decodeFromJsonElement(variant, element)");
        file.push_line("            } catch (_: SerializationException) {");
        file.push_line("                // try the next variant in declared order");
        file.push_line("            }");
        file.push_line("        }");
        file.push_line(&format!(
            "        throw SerializationException(\"No variant of {type_name} matched the payload\")"
        ));
        file.push_line("    }");
        file.push("\n");

        file.push_line(&format!(
            "    override fun serialize(encoder: Encoder, value: {type_name}) {{"
        ));
        file.push_line("        when (value) {");
        for variant in variants {
            file.push_line(&format!(
                "            is {variant} -> encoder.encodeSerializableValue({variant}.serializer(), value)"
            ));
        }
        file.push_line("        }");
        file.push_line("    }");
        file.push_line("}");
    }
}

fn description_of(node: &SchemaNode) -> Option<&str> {
    match node {
        SchemaNode::Primitive(p) => p.description.as_deref(),
        SchemaNode::Enum(e) => e.description.as_deref(),
        _ => None,
    }
}
