//! Symbol-model side of the completion engine.
//!
//! Pipeline position: source snapshot -> token stream -> (engine in `ide`).
//! All spans are UTF-8 byte offsets into the original source, `[start, end)`.
//! The model is a frozen, read-only oracle: the engine derives candidates
//! from it and never writes back.

pub mod lexer;
pub mod model;
mod oracle;
mod span;
mod text_edit;

pub use lexer::{Lit, LitKind, Symbol, Token, TokenKind, lex};
pub use model::{
    Accessibility, Assembly, AssemblyId, Browsability, GenericOwner, Member, MemberId, MemberKind,
    Modifiers, NumericKind, Param, SiteRelation, Subst, SymbolKind, Ty, TypeDef, TypeId, TypeKind,
    TypeParamDef,
};
pub use model::conversions;
pub use model::naming::{self, Casing, NamingRule, NamingStyles};
pub use oracle::{ExprClass, ScopeBinding, SemanticModel, Site};
pub use span::Span;
pub use text_edit::TextEdit;

#[cfg(test)]
mod tests;
