//! Named primitive code generation.
//!
//! A named primitive schema becomes a distinct nominal wrapper rather
//! than a bare alias, so two string-backed schemas stay distinguishable
//! types. `@JvmInline value class` keeps the wire representation the bare
//! base value.

use crate::kotlin::types::primitive_type;
use crate::kotlin::{KotlinFile, kdoc};
use ktgen_schema::PrimitiveDef;

/// Generator for primitive wrapper declarations.
pub struct PrimitiveGenerator;

impl PrimitiveGenerator {
    /// Emits a value class wrapping the mapped base type.
    pub fn generate(type_name: &str, def: &PrimitiveDef, file: &mut KotlinFile) {
        let base = primitive_type(def.primitive_type, def.format.as_deref());

        file.import("kotlinx.serialization.Serializable");
        file.push(&kdoc(def.description.as_deref()));
        file.push_line("@Serializable");
        file.push_line("@JvmInline");
        file.push_line(&format!("value class {type_name}(val value: {base})"));
    }
}
