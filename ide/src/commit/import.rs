//! Import commit: one splice that inserts a using directive at its canonical
//! location and the member text at the cursor, copying every byte in between
//! verbatim so trivia and surrounding members survive untouched.

use semantics::Span;

use super::{CommitEdit, CommitError};
use crate::context::Directive;

pub(super) fn synthesize(
    source: &str,
    replace: Span,
    namespace: &str,
    directives: &[Directive],
    fallback_insert: u32,
    insert_text: &str,
) -> Result<CommitEdit, CommitError> {
    // Keep the existing directive ordering: insert before the first
    // directive sorting after the new namespace, else after the last one.
    let insert_at = directives
        .iter()
        .find(|d| d.namespace.as_str() > namespace)
        .map(|d| d.line_start)
        .or_else(|| directives.last().map(|d| d.line_end))
        .unwrap_or(fallback_insert);

    if insert_at > replace.start {
        return Err(CommitError::AmbiguousAnchor);
    }
    let between = Span::new(insert_at, replace.start)
        .slice(source)
        .ok_or(CommitError::StaleAnchor)?;

    let new_text = format!("using {namespace};\n{between}{insert_text}");
    let range = Span::new(insert_at, replace.end);
    let caret = range.start + new_text.len() as u32;
    Ok(CommitEdit {
        range,
        new_text,
        caret,
    })
}
