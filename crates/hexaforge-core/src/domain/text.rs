//! Line buffer helpers for ordered text assembly.
//!
//! Generated artifacts are plain `Vec<String>` line buffers; these helpers
//! keep indentation, separators and identifier casing consistent across the
//! builders.

/// One indentation step in generated sources.
pub const INDENT: &str = "    ";

/// Indent `line` by `level` steps. Blank lines stay blank.
pub fn indent(line: &str, level: usize) -> String {
    if line.is_empty() {
        return String::new();
    }
    format!("{}{}", INDENT.repeat(level), line)
}

/// Drop the trailing comma of the last non-blank line, if any.
///
/// Used after emitting a comma-terminated list one element per line.
pub fn trim_trailing_comma(lines: &mut [String]) {
    if let Some(last) = lines.iter_mut().rev().find(|l| !l.trim().is_empty()) {
        let trimmed = last.trim_end();
        if let Some(stripped) = trimmed.strip_suffix(',') {
            *last = stripped.to_string();
        }
    }
}

/// `Customer` → `customer`.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `email` → `Email`.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `my-cool_app` → `MyCoolApp`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(upper_first)
        .collect()
}

/// `com.acme.domain` → `["com", "acme", "domain"]`.
pub fn package_segments(package: &str) -> Vec<String> {
    package
        .split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reduce `s` to something usable as a single package segment.
///
/// Lower-cases and drops every character that is not ASCII alphanumeric;
/// a leading digit is prefixed with `_`.
pub fn package_segment(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match cleaned.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{cleaned}"),
        _ => cleaned,
    }
}

/// Split a type expression into the identifiers it references.
///
/// `Map<String, List<Order>>` → `["Map", "String", "List", "Order"]`.
pub fn type_tokens(ty: &str) -> Vec<&str> {
    ty.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.' || c == '$'))
        .filter(|t| !t.is_empty())
        .collect()
}
