use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A single replacement of a byte range with new text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Span,
    pub new_text: String,
}
