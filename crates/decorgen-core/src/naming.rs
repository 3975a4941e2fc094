//! Rust naming for generated items (prost-compatible).

use heck::{ToSnakeCase, ToUpperCamelCase};

// Keywords that can be written as raw identifiers.
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

// Keywords that cannot be raw identifiers; prost appends an underscore.
const RESERVED: &[&str] = &["self", "super", "crate", "Self", "_"];

/// A snake_case identifier (method, field or module name), escaped if needed.
pub fn snake_ident(name: &str) -> String {
    escape(name.to_snake_case())
}

/// An UpperCamelCase type name, escaped if needed.
pub fn type_ident(name: &str) -> String {
    escape(name.to_upper_camel_case())
}

fn escape(ident: String) -> String {
    if RESERVED.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if RAW_KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}

/// Lowercase key used for loggable field names (`words_message`).
pub fn field_key(message: &str, field: &str) -> String {
    format!("{}_{}", message.to_snake_case(), field.to_snake_case())
}

/// Output file name: the input's `.proto` extension replaced by `suffix`.
///
/// `api/hello.proto` + `.analytics.rs` → `api/hello.analytics.rs`.
pub fn output_file_name(input: &str, suffix: &str) -> String {
    let stem = input.strip_suffix(".proto").unwrap_or(input);
    format!("{stem}{suffix}")
}
