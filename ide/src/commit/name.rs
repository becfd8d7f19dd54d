//! Name and plain-text insert commits.

use semantics::Span;

use super::CommitEdit;

/// Reserved words that need `@` escaping when used as identifiers.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub(crate) fn escape_ident(name: &str) -> String {
    if RESERVED_WORDS.contains(&name) {
        format!("@{name}")
    } else {
        name.to_string()
    }
}

/// Inserts a suggested identifier, escaping reserved words.
pub(super) fn synthesize(replace: Span, text: &str) -> CommitEdit {
    plain_insert(replace, &escape_ident(text))
}

pub(super) fn plain_insert(replace: Span, text: &str) -> CommitEdit {
    CommitEdit {
        range: replace,
        new_text: text.to_string(),
        caret: replace.start + text.len() as u32,
    }
}
