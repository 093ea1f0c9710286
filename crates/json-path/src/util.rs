//! JSONPath utility helpers.

use crate::types::PathComponent;

/// Format path components as an RFC 9535 normalized path, e.g. `$['a'][0]`.
pub fn format_normalized_path(components: &[PathComponent]) -> String {
    let mut out = String::from("$");
    for component in components {
        match component {
            PathComponent::Key(key) => {
                out.push_str("['");
                out.push_str(&escape_name(key));
                out.push_str("']");
            }
            PathComponent::Index(idx) => {
                out.push_str(&format!("[{idx}]"));
            }
        }
    }
    out
}

/// Escape a member name for use inside a single-quoted normalized path.
fn escape_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
