//! Symbol-driven completion and code-synthesis engine.
//!
//! Pipeline: context analysis -> candidate resolvers -> filter & rank ->
//! item materialization -> (on acceptance) commit synthesis. Everything runs
//! against one frozen source snapshot and one read-only [`SemanticModel`];
//! all coordinates are UTF-8 byte offsets, spans half-open `[start, end)`.

use semantics::{NamingStyles, SemanticModel, Span};

mod cancel;
mod commit;
mod context;
mod items;
mod ranking;
mod resolve;
mod text_edit;

pub use cancel::CancellationToken;
pub use commit::{CommitEdit, CommitError};
pub use context::Directive;
pub use items::{
    Anchor, AnchorDetail, CommitPayload, CompletionItem, CompletionItemKind, FilterTag,
};
pub use resolve::{
    CandidateTag, ConversionCandidate, ConversionKind, ExplicitImplCandidate, ExtensionCandidate,
    InitializerCandidate, NameCandidate, OverrideCandidate, SymbolCandidate,
};
pub use text_edit::apply_commit;

/// Host-supplied configuration knobs for one completion session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    /// Drop members marked "advanced" by their editor-visibility attribute.
    pub hide_advanced_members: bool,
    /// Offer extension methods whose container namespace is not imported
    /// yet; committing one also inserts the import.
    pub show_unimported_extension_members: bool,
    pub naming: NamingStyles,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            hide_advanced_members: false,
            show_unimported_extension_members: true,
            naming: NamingStyles::default(),
        }
    }
}

/// Result of a completion query at a byte cursor.
#[derive(Debug, Clone)]
pub struct CompletionOutput {
    pub items: Vec<CompletionItem>,
    /// Span the committed text replaces (typed prefix, or empty at cursor).
    pub replace: Span,
    /// The session observed cancellation; the list is not meaningful.
    pub cancelled: bool,
}

/// Computes the completion item list at a byte cursor.
pub fn complete(
    source: &str,
    cursor: usize,
    model: &SemanticModel,
    config: &CompletionConfig,
) -> CompletionOutput {
    complete_with_cancellation(source, cursor, model, config, &CancellationToken::new())
}

/// Like [`complete`], observing a cooperative cancellation token. A new
/// trigger cancels the previous session's token; the cancelled run returns
/// an empty, flagged output that callers discard.
pub fn complete_with_cancellation(
    source: &str,
    cursor: usize,
    model: &SemanticModel,
    config: &CompletionConfig,
    cancel: &CancellationToken,
) -> CompletionOutput {
    CompletionSession {
        source,
        cursor: u32::try_from(cursor).unwrap_or(u32::MAX),
        model,
        config,
        cancel,
    }
    .run()
}

/// Synthesizes the single text edit committing `item`, re-validating its
/// anchor against the current snapshot first. On failure the buffer is left
/// untouched and the error says whether a retry against a fresh list can
/// succeed.
pub fn commit(
    source: &str,
    item: &CompletionItem,
    model: &SemanticModel,
) -> Result<CommitEdit, CommitError> {
    commit::synthesize(source, item, model)
}

struct CompletionSession<'a> {
    source: &'a str,
    cursor: u32,
    model: &'a SemanticModel,
    config: &'a CompletionConfig,
    cancel: &'a CancellationToken,
}

impl CompletionSession<'_> {
    fn run(self) -> CompletionOutput {
        let tokens = semantics::lex(self.source);

        // 1) Classify the trigger position.
        let ctx = context::analyze(self.source, &tokens, self.cursor, self.model);

        // 2) Run the applicable resolvers concurrently over the snapshot.
        let input = resolve::ResolveInput {
            cursor: self.cursor,
            ctx: &ctx,
            model: self.model,
            config: self.config,
            site: ctx.site,
            cancel: self.cancel,
        };
        let candidates = resolve::run_resolvers(&input);

        if self.cancel.is_cancelled() {
            return CompletionOutput {
                items: Vec::new(),
                replace: ctx.replace,
                cancelled: true,
            };
        }

        // 3) Filter, dedup, and assign deterministic sort keys.
        let ranked = ranking::filter_and_rank(candidates, self.model, ctx.site, self.config);

        // 4) Materialize immutable items with commit payloads.
        let items = items::materialize(ranked, &ctx, self.source, self.model);
        tracing::debug!(count = items.len(), "completion list ready");

        CompletionOutput {
            items,
            replace: ctx.replace,
            cancelled: false,
        }
    }
}

#[cfg(test)]
mod tests;
