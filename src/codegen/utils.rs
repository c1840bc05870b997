//! Shared helpers for name shaping in emitted code.

/// Upper-case the first character, leaving the rest untouched.
/// Instruction names arrive camelCased and keep their interior casing.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
