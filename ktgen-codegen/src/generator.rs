//! Top-level generation driver.
//!
//! Walks every named schema in a parsed specification, dispatches to the
//! per-kind Kotlin generators and collects the results into a report. A
//! schema that fails to generate is recorded and skipped; the remaining
//! schemas still produce output.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::CodegenError;
use crate::kotlin::{
    EnumGenerator, KotlinFile, ObjectGenerator, PrimitiveGenerator, UnionGenerator,
};
use ktgen_schema::{EmptyDef, OpenApiSpec, SchemaNode};

/// One rendered Kotlin source file.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Name of the schema the file was generated from.
    pub schema: String,
    /// File name, e.g. `AccountId.kt`.
    pub file_name: String,
    /// Complete file content.
    pub content: String,
}

/// A schema that could not be generated.
#[derive(Debug)]
pub struct SchemaFailure {
    /// Name of the failing schema.
    pub schema: String,
    /// The error that stopped generation.
    pub error: CodegenError,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Successfully generated files, in schema declaration order.
    pub files: Vec<GeneratedFile>,
    /// Schemas that failed, in schema declaration order.
    pub failures: Vec<SchemaFailure>,
}

impl GenerationReport {
    /// Returns true when every schema generated successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives code generation for an entire specification.
pub struct Generator<'a> {
    spec: &'a OpenApiSpec,
    package: String,
}

impl<'a> Generator<'a> {
    /// Creates a generator targeting the given Kotlin package.
    #[must_use]
    pub fn new(spec: &'a OpenApiSpec, package: &str) -> Self {
        Self {
            spec,
            package: package.to_string(),
        }
    }

    /// Generates one Kotlin file per eligible schema.
    ///
    /// Top-level reference aliases and array aliases produce no file of
    /// their own; property types that point at them resolve through to
    /// the underlying type instead.
    #[must_use]
    pub fn generate(&self) -> GenerationReport {
        let mut report = GenerationReport::default();
        let mut emitted: HashSet<String> = HashSet::new();

        for node in &self.spec.schemas {
            let name = node.name().to_string();
            match node {
                SchemaNode::Reference(def) => {
                    debug!(schema = %name, target = %def.target, "skipping alias schema");
                    continue;
                }
                SchemaNode::Array(_) => {
                    debug!(schema = %name, "skipping top-level array alias");
                    continue;
                }
                _ => {}
            }
            if !emitted.insert(name.clone()) {
                warn!(schema = %name, "duplicate schema name, keeping first");
                continue;
            }

            match self.generate_schema(&name, node) {
                Ok(file) => {
                    debug!(schema = %name, file = %file.file_name, "generated");
                    report.files.push(file);
                }
                Err(error) => {
                    warn!(schema = %name, %error, "generation failed");
                    report.failures.push(SchemaFailure {
                        schema: name,
                        error,
                    });
                }
            }
        }

        info!(
            generated = report.files.len(),
            failed = report.failures.len(),
            "generation complete"
        );
        report
    }

    fn generate_schema(
        &self,
        name: &str,
        node: &SchemaNode,
    ) -> Result<GeneratedFile, CodegenError> {
        let mut file = KotlinFile::new(&self.package);
        let objects = ObjectGenerator::new(self.spec);

        match node {
            SchemaNode::Object(def) => objects.generate(name, def, &mut file)?,
            SchemaNode::Empty(def) => objects.generate_empty(name, def, &mut file),
            SchemaNode::Enum(def) => EnumGenerator::generate(name, def, &mut file),
            SchemaNode::Primitive(def) => PrimitiveGenerator::generate(name, def, &mut file),
            SchemaNode::OneOf(def) => {
                UnionGenerator::new(self.spec).generate(name, def, &mut file)?;
            }
            SchemaNode::AnyOf(def) => {
                let merged = objects.flatten_any_of(def)?;
                if merged.properties.is_empty() {
                    let empty = EmptyDef::new(name.to_string());
                    objects.generate_empty(name, &empty, &mut file);
                } else {
                    objects.generate(name, &merged, &mut file)?;
                }
            }
            SchemaNode::AllOf(def) => {
                let merged = objects.merge_all_of(def)?;
                if merged.properties.is_empty() {
                    let empty = EmptyDef::new(name.to_string());
                    objects.generate_empty(name, &empty, &mut file);
                } else {
                    objects.generate(name, &merged, &mut file)?;
                }
            }
            SchemaNode::Reference(_) | SchemaNode::Array(_) => {
                return Err(CodegenError::generation(format!(
                    "alias schema '{name}' has no standalone output"
                )));
            }
        }

        Ok(GeneratedFile {
            schema: name.to_string(),
            file_name: format!("{name}.kt"),
            content: file.render(),
        })
    }

    /// Generates and writes every file under `dest`, one file per schema,
    /// inside the package directory tree.
    ///
    /// # Errors
    /// Returns an IO error if the output tree cannot be created or a
    /// file cannot be written. Per-schema generation failures do not
    /// error; they are reported in the returned report.
    pub fn write_to(&self, dest: &Path) -> Result<GenerationReport, CodegenError> {
        let report = self.generate();
        let package_dir = self.package_dir(dest);
        fs::create_dir_all(&package_dir)?;

        for file in &report.files {
            let path = package_dir.join(&file.file_name);
            fs::write(&path, &file.content)?;
        }
        info!(dest = %package_dir.display(), files = report.files.len(), "wrote output");
        Ok(report)
    }

    fn package_dir(&self, dest: &Path) -> PathBuf {
        let mut dir = dest.to_path_buf();
        for segment in self.package.split('.') {
            dir.push(segment);
        }
        dir
    }
}
