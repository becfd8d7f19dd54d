//! Commit synthesis: turns a chosen item's payload into a single
//! trivia-preserving [`CommitEdit`], or fails closed without touching the
//! buffer.

use serde::{Deserialize, Serialize};
use semantics::{SemanticModel, Span};
use thiserror::Error;

use crate::items::{AnchorDetail, CompletionItem};
use crate::resolve::SymbolCandidate;

mod cast;
mod import;
mod name;
mod stub;

pub(crate) use name::escape_ident;

/// The single text edit a successful commit applies, with the caret offset
/// in the post-edit document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEdit {
    pub range: Span,
    pub new_text: String,
    pub caret: u32,
}

/// Why a commit produced no edit. Nothing here is fatal; a stale anchor is
/// retryable against a fresh completion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("completion anchor is stale; recompute the list and retry")]
    StaleAnchor,
    #[error("insertion anchor is ambiguous")]
    AmbiguousAnchor,
    #[error("modifier run spans multiple lines before the keyword")]
    MultilineModifiers,
    #[error("synthesized edit would not parse")]
    InvalidSynthesis,
}

impl CommitError {
    pub fn is_retryable(self) -> bool {
        matches!(self, CommitError::StaleAnchor)
    }
}

/// Synthesizes the commit edit for `item` against the current snapshot.
///
/// The anchor is re-validated first: if the guarded source range changed
/// since the list was computed, the commit aborts with [`CommitError::StaleAnchor`]
/// and the buffer is left untouched.
pub(crate) fn synthesize(
    source: &str,
    item: &CompletionItem,
    model: &SemanticModel,
) -> Result<CommitEdit, CommitError> {
    let anchor = &item.payload.anchor;
    match anchor.guard.slice(source) {
        Some(current) if current == anchor.expected => {}
        _ => return Err(CommitError::StaleAnchor),
    }

    let edit = match (&anchor.detail, &item.payload.candidate) {
        (AnchorDetail::Cast { receiver, conditional }, SymbolCandidate::Conversion(c)) => {
            cast::synthesize(
                source,
                anchor.replace,
                *receiver,
                *conditional,
                &model.display_ty(&c.target),
            )?
        }
        (AnchorDetail::Stub { .. }, SymbolCandidate::Override(c)) => {
            stub::synthesize_override(anchor, c, model)?
        }
        (AnchorDetail::Stub { .. }, SymbolCandidate::ExplicitInterface(c)) => {
            stub::synthesize_explicit(anchor, c, model)?
        }
        (
            AnchorDetail::Import {
                namespace,
                directives,
                fallback_insert,
            },
            candidate,
        ) => import::synthesize(
            source,
            anchor.replace,
            namespace,
            directives,
            *fallback_insert,
            &crate::items::insert_text(candidate, model),
        )?,
        (AnchorDetail::Insert, SymbolCandidate::Name(c)) => {
            name::synthesize(anchor.replace, &c.text)
        }
        (AnchorDetail::Insert, candidate) => {
            name::plain_insert(anchor.replace, &crate::items::insert_text(candidate, model))
        }
        _ => return Err(CommitError::AmbiguousAnchor),
    };

    if !parses_in_isolation(&edit.new_text) {
        return Err(CommitError::InvalidSynthesis);
    }
    tracing::debug!(
        start = edit.range.start,
        end = edit.range.end,
        len = edit.new_text.len(),
        "synthesized commit edit"
    );
    Ok(edit)
}

/// Cheap structural validity check on the replacement text: delimiters must
/// balance and never go negative.
fn parses_in_isolation(text: &str) -> bool {
    let mut paren = 0i32;
    let mut bracket = 0i32;
    let mut brace = 0i32;
    for ch in text.chars() {
        match ch {
            '(' => paren += 1,
            ')' => paren -= 1,
            '[' => bracket += 1,
            ']' => bracket -= 1,
            '{' => brace += 1,
            '}' => brace -= 1,
            _ => {}
        }
        if paren < 0 || bracket < 0 || brace < 0 {
            return false;
        }
    }
    paren == 0 && bracket == 0 && brace == 0
}
