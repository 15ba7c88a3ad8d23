//! Enum code generation.

use crate::kotlin::{KotlinFile, kdoc};
use crate::naming::to_enum_constant;
use ktgen_schema::EnumDef;

/// Generator for enum declarations.
pub struct EnumGenerator;

impl EnumGenerator {
    /// Emits an enum class with one constant per wire value.
    ///
    /// Constants are named via the UPPER_SNAKE conversion and always
    /// annotated with the exact source value, so the wire representation
    /// is byte-for-byte the original string regardless of the constant
    /// name.
    pub fn generate(type_name: &str, def: &EnumDef, file: &mut KotlinFile) {
        file.import("kotlinx.serialization.SerialName");
        file.import("kotlinx.serialization.Serializable");

        file.push(&kdoc(def.description.as_deref()));
        file.push_line("@Serializable");
        file.push_line(&format!("enum class {type_name} {{"));
        for value in &def.values {
            let constant = to_enum_constant(value);
            file.push_line(&format!("    @SerialName(\"{value}\")"));
            file.push_line(&format!("    {constant},"));
        }
        file.push_line("}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktgen_schema::EnumWireType;

    #[test]
    fn test_generate_enum_scenario() {
        let mut def = EnumDef::new("Status".to_string(), EnumWireType::String);
        def.add_value("ACTIVE".to_string());
        def.add_value("near-final".to_string());

        let mut file = KotlinFile::new("test");
        EnumGenerator::generate("Status", &def, &mut file);
        let out = file.render();

        assert!(out.contains("enum class Status {"));
        assert!(out.contains("@SerialName(\"ACTIVE\")\n    ACTIVE,"));
        assert!(out.contains("@SerialName(\"near-final\")\n    NEAR_FINAL,"));
    }

    #[test]
    fn test_enum_wire_values_are_verbatim_and_ordered() {
        let mut def = EnumDef::new("Level".to_string(), EnumWireType::String);
        for value in ["high", "mid-range", "123low"] {
            def.add_value(value.to_string());
        }

        let mut file = KotlinFile::new("test");
        EnumGenerator::generate("Level", &def, &mut file);
        let out = file.render();

        // Every source value appears exactly once as a wire annotation.
        for value in ["high", "mid-range", "123low"] {
            assert_eq!(out.matches(&format!("@SerialName(\"{value}\")")).count(), 1);
        }
        assert!(out.contains("_123LOW,"));

        let high = out.find("HIGH,").unwrap();
        let mid = out.find("MID_RANGE,").unwrap();
        let low = out.find("_123LOW,").unwrap();
        assert!(high < mid && mid < low);
    }

    #[test]
    fn test_integer_enum_values_annotated_verbatim() {
        let mut def = EnumDef::new("Version".to_string(), EnumWireType::Integer);
        def.add_value("0".to_string());
        def.add_value("1".to_string());

        let mut file = KotlinFile::new("test");
        EnumGenerator::generate("Version", &def, &mut file);
        let out = file.render();

        assert!(out.contains("@SerialName(\"0\")\n    _0,"));
        assert!(out.contains("@SerialName(\"1\")\n    _1,"));
    }
}
