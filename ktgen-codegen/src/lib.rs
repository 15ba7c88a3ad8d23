//! # ktgen Codegen
//!
//! Kotlin code generation from parsed OpenAPI schemas.
//!
//! This crate provides:
//! - Per-kind generators for data classes, enums, value classes and
//!   sealed unions backed by kotlinx.serialization
//! - Wire-name preservation via `@SerialName` wherever a Kotlin
//!   identifier diverges from the schema field name
//! - A generation driver that renders one file per named schema and
//!   writes the package directory tree

pub mod error;
pub mod generator;
pub mod kotlin;
pub mod naming;

pub use error::CodegenError;
pub use generator::{GeneratedFile, GenerationReport, Generator, SchemaFailure};
pub use kotlin::{EnumGenerator, KotlinFile, ObjectGenerator, PrimitiveGenerator, UnionGenerator};

use std::path::Path;

use ktgen_schema::parse_spec_file;

/// Parses a specification file and writes generated Kotlin sources
/// under `dest`, inside the directory tree for `package`.
///
/// # Errors
/// Returns an error if the specification cannot be read or parsed, or
/// if the output tree cannot be written. Individual schema failures are
/// reported in the returned report instead.
pub fn generate_from_file(
    spec_path: &Path,
    dest: &Path,
    package: &str,
) -> Result<GenerationReport, CodegenError> {
    let spec = parse_spec_file(spec_path)?;
    Generator::new(&spec, package).write_to(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_generate_from_file_end_to_end() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let spec_path = dir.path().join("openapi.json");
        fs::write(
            &spec_path,
            r#"{"components": {"schemas": {
                "BlockHash": {"type": "string"}
            }}}"#,
        )
        .unwrap();

        let out = dir.path().join("generated");
        let report = generate_from_file(&spec_path, &out, "org.near.model")
            .expect("generation failed");
        assert!(report.is_success());

        let content = fs::read_to_string(out.join("org/near/model/BlockHash.kt")).unwrap();
        assert!(content.contains("value class BlockHash(val value: String)"));
    }

    #[test]
    fn test_generate_from_file_missing_spec() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_from_file(
            &dir.path().join("absent.json"),
            dir.path(),
            "org.near.model",
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::Parse(_)));
    }
}
