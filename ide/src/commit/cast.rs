//! Cast-wrap commit: replaces `<receiver>.` (and any typed prefix) with
//! `((<Target>)<receiver>)`, keeping a trailing `?` when the access was
//! conditional so the remaining chain stays conditional.

use semantics::Span;

use super::{CommitEdit, CommitError};

pub(super) fn synthesize(
    source: &str,
    replace: Span,
    receiver: Span,
    conditional: bool,
    target: &str,
) -> Result<CommitEdit, CommitError> {
    if receiver.is_empty() || receiver.end > replace.end {
        return Err(CommitError::AmbiguousAnchor);
    }
    let receiver_text = receiver.slice(source).ok_or(CommitError::StaleAnchor)?;

    let mut new_text = format!("(({target}){receiver_text})");
    if conditional {
        new_text.push('?');
    }

    let range = Span::new(receiver.start, replace.end);
    let caret = range.start + new_text.len() as u32;
    Ok(CommitEdit {
        range,
        new_text,
        caret,
    })
}
