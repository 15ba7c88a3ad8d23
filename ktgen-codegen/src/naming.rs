//! Identifier conversion between wire names and Kotlin conventions.
//!
//! Wire names are snake_case (occasionally kebab-case or digit-leading);
//! generated Kotlin uses camelCase properties and UPPER_SNAKE enum
//! constants. The original wire name is preserved via `@SerialName`
//! whenever the converted identifier differs, so serialization round-trips
//! exactly.

/// Converts a snake_case wire name to a camelCase identifier.
///
/// The first segment is kept as-is; each subsequent segment has its first
/// character upper-cased and the rest unchanged. Strings without
/// underscores pass through untouched.
#[must_use]
pub fn snake_to_camel(s: &str) -> String {
    let mut segments = s.split('_');
    let mut result = String::with_capacity(s.len());

    if let Some(first) = segments.next() {
        result.push_str(first);
    }
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(c) = chars.next() {
            result.extend(c.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}

/// Converts a wire value to an UPPER_SNAKE enum constant name.
///
/// Every character that is not alphanumeric or an underscore becomes `_`,
/// the whole string is upper-cased, and a leading digit gets an underscore
/// prefix.
#[must_use]
pub fn to_enum_constant(s: &str) -> String {
    let mut result: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if result.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    result
}

/// Converts a wire name to a PascalCase type name.
///
/// Used for hoisted auxiliary types: the property name is camel-cased and
/// its first character upper-cased.
#[must_use]
pub fn to_type_name(s: &str) -> String {
    let camel = snake_to_camel(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => camel,
    }
}

/// Kotlin hard keywords that cannot be used as bare identifiers.
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Escapes an identifier that collides with a Kotlin keyword or contains
/// characters illegal in a bare identifier, using backticks.
///
/// Escaping never renames: the identifier inside the backticks is the
/// converted name, so the wire-name annotation stays correct.
#[must_use]
pub fn escape_identifier(s: &str) -> String {
    let needs_escape = KOTLIN_KEYWORDS.contains(&s)
        || s.chars().next().is_some_and(|c| c.is_ascii_digit())
        || !s.chars().all(|c| c.is_alphanumeric() || c == '_');

    if needs_escape {
        format!("`{s}`")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("last_final_block"), "lastFinalBlock");
        assert_eq!(snake_to_camel("user_name"), "userName");
        assert_eq!(snake_to_camel("balance"), "balance");
        assert_eq!(snake_to_camel("block_hash"), "blockHash");
    }

    #[test]
    fn test_snake_to_camel_is_noop_without_underscores() {
        assert_eq!(snake_to_camel("alreadyCamel"), "alreadyCamel");
        assert_eq!(snake_to_camel(""), "");
    }

    #[test]
    fn test_snake_to_camel_keeps_segment_tails() {
        // Only the first character of each later segment changes.
        assert_eq!(snake_to_camel("tx_hASH"), "txHASH");
    }

    #[test]
    fn test_to_enum_constant() {
        assert_eq!(to_enum_constant("near-final"), "NEAR_FINAL");
        assert_eq!(to_enum_constant("ACTIVE"), "ACTIVE");
        assert_eq!(to_enum_constant("some value"), "SOME_VALUE");
        assert_eq!(to_enum_constant("123value"), "_123VALUE");
    }

    #[test]
    fn test_to_enum_constant_replaces_punctuation() {
        assert_eq!(to_enum_constant("v1.2/beta"), "V1_2_BETA");
    }

    #[test]
    fn test_to_type_name() {
        assert_eq!(to_type_name("settings"), "Settings");
        assert_eq!(to_type_name("user_settings"), "UserSettings");
        assert_eq!(to_type_name("permission"), "Permission");
    }

    #[test]
    fn test_escape_identifier_keywords() {
        assert_eq!(escape_identifier("object"), "`object`");
        assert_eq!(escape_identifier("when"), "`when`");
        assert_eq!(escape_identifier("userName"), "userName");
    }

    #[test]
    fn test_escape_identifier_illegal_chars() {
        assert_eq!(escape_identifier("near-final"), "`near-final`");
        assert_eq!(escape_identifier("1block"), "`1block`");
    }
}
