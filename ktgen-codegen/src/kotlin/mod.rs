//! Kotlin code generation modules.

pub mod enums;
pub mod objects;
pub mod primitives;
pub mod types;
pub mod unions;

pub use enums::EnumGenerator;
pub use objects::ObjectGenerator;
pub use primitives::PrimitiveGenerator;
pub use unions::UnionGenerator;

use std::collections::BTreeSet;
use std::fmt::Write;

/// Accumulates one Kotlin output unit: package declaration, imports and
/// the type declarations that follow.
#[derive(Debug, Clone)]
pub struct KotlinFile {
    package: String,
    imports: BTreeSet<String>,
    body: String,
}

impl KotlinFile {
    /// Creates an empty file in the given package.
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
            imports: BTreeSet::new(),
            body: String::new(),
        }
    }

    /// Records an import; duplicates collapse and output stays sorted.
    pub fn import(&mut self, path: &str) {
        self.imports.insert(path.to_string());
    }

    /// Appends a fragment to the body.
    pub fn push(&mut self, fragment: &str) {
        self.body.push_str(fragment);
    }

    /// Appends a line to the body.
    pub fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    /// Renders the complete file content.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "package {}", self.package);
        out.push('\n');
        for import in &self.imports {
            let _ = writeln!(out, "import {import}");
        }
        if !self.imports.is_empty() {
            out.push('\n');
        }
        out.push_str(self.body.trim_start_matches('\n'));
        out
    }
}

/// Renders a KDoc block for an optional description.
#[must_use]
pub fn kdoc(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let mut out = String::from("/**\n");
            for line in text.lines() {
                if line.is_empty() {
                    out.push_str(" *\n");
                } else {
                    out.push_str(" * ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            out.push_str(" */\n");
            out
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_orders_imports() {
        let mut file = KotlinFile::new("com.example.model");
        file.import("kotlinx.serialization.Serializable");
        file.import("kotlinx.serialization.SerialName");
        file.push_line("class A");

        let out = file.render();
        assert!(out.starts_with("package com.example.model\n"));
        let serial_name = out.find("SerialName").unwrap();
        let serializable = out.find("Serializable").unwrap();
        assert!(serial_name < serializable);
        assert!(out.ends_with("class A\n"));
    }

    #[test]
    fn test_imports_deduplicated() {
        let mut file = KotlinFile::new("p");
        file.import("kotlinx.serialization.Serializable");
        file.import("kotlinx.serialization.Serializable");
        assert_eq!(file.render().matches("import ").count(), 1);
    }

    #[test]
    fn test_kdoc_multiline() {
        let doc = kdoc(Some("First line\n\nSecond line"));
        assert!(doc.contains("/**\n * First line\n *\n * Second line\n */\n"));
        assert_eq!(kdoc(None), "");
        assert_eq!(kdoc(Some("")), "");
    }
}
