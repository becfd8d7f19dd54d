//! Item materialization: converts ranked candidates into immutable
//! [`CompletionItem`]s with display/sort/filter text, category, filter tags,
//! and an opaque commit payload. Description text stays lazy; it is rendered
//! only on request.

use semantics::{MemberKind, SemanticModel, Span, Subst, Ty};

use crate::context::{AnalyzedContext, ContextKind, Directive};
use crate::ranking::RankedCandidate;
use crate::resolve::SymbolCandidate;

/// Category/glyph bucket for UI grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionItemKind {
    Method,
    ExtensionMethod,
    Property,
    Field,
    Event,
    Indexer,
    Operator,
    Identifier,
}

/// Targeted-typing filter buckets a host can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTag {
    Methods,
    ExtensionMethods,
    Properties,
    Fields,
    Events,
    Operators,
    Identifiers,
}

/// Everything the commit synthesizer needs, captured at list time.
#[derive(Debug, Clone)]
pub struct CommitPayload {
    pub candidate: SymbolCandidate,
    pub anchor: Anchor,
}

/// The insertion anchor: the replace span, a guarded source slice for
/// staleness re-validation, and kind-specific geometry.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub replace: Span,
    pub guard: Span,
    /// Source bytes under `guard` when the list was computed; a mismatch at
    /// commit time aborts fail-closed.
    pub expected: String,
    pub detail: AnchorDetail,
}

#[derive(Debug, Clone)]
pub enum AnchorDetail {
    /// Cast-wrap a member-access receiver.
    Cast { receiver: Span, conditional: bool },
    /// Replace an in-progress member declaration with a synthesized stub.
    Stub {
        decl_start: u32,
        indent: String,
        written_modifiers: Vec<String>,
        multiline: bool,
        interface_qualifier: Option<String>,
    },
    /// Insert the item text and a using directive in one splice.
    Import {
        namespace: String,
        directives: Vec<Directive>,
        fallback_insert: u32,
    },
    /// Plain insertion at the replace span.
    Insert,
}

/// One presented completion candidate. Two items are distinct if
/// `(display_text, sort_text)` differ; collisions are disambiguated during
/// materialization.
#[derive(Debug, Clone)]
pub struct CompletionItem {
    pub display_text: String,
    pub sort_text: String,
    pub filter_text: String,
    pub kind: CompletionItemKind,
    /// Originating namespace/container, when one exists.
    pub inline_description: Option<String>,
    pub filter_tags: Vec<FilterTag>,
    pub payload: CommitPayload,
}

impl CompletionItem {
    /// Full description text, computed on demand only.
    pub fn description(&self, model: &SemanticModel) -> String {
        description_text(&self.payload.candidate, model)
    }
}

pub(crate) fn materialize(
    ranked: Vec<RankedCandidate>,
    ctx: &AnalyzedContext,
    source: &str,
    model: &SemanticModel,
) -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = ranked
        .into_iter()
        .filter_map(|r| build_item(r, ctx, source, model))
        .collect();

    // Disambiguate (display, sort) collisions with an opaque counter so the
    // pair stays a unique identity.
    for idx in 1..items.len() {
        let (before, rest) = items.split_at_mut(idx);
        let item = &mut rest[0];
        let collisions = before
            .iter()
            .filter(|other| {
                other.display_text == item.display_text
                    && other.sort_text.split('\u{1}').next() == Some(item.sort_text.as_str())
            })
            .count();
        if collisions > 0 {
            item.sort_text = format!("{}\u{1}{}", item.sort_text, collisions);
        }
    }
    items
}

fn build_item(
    ranked: RankedCandidate,
    ctx: &AnalyzedContext,
    source: &str,
    model: &SemanticModel,
) -> Option<CompletionItem> {
    let candidate = ranked.candidate;
    let anchor = anchor_for(&candidate, ctx, source)?;

    Some(CompletionItem {
        display_text: display_text(&candidate, model),
        sort_text: ranked.sort_text,
        filter_text: filter_text(&candidate, model),
        kind: item_kind(&candidate, model),
        inline_description: inline_description(&candidate, model),
        filter_tags: filter_tags(&candidate, model),
        payload: CommitPayload { candidate, anchor },
    })
}

fn anchor_for(
    candidate: &SymbolCandidate,
    ctx: &AnalyzedContext,
    source: &str,
) -> Option<Anchor> {
    let replace = ctx.replace;
    let (guard, detail) = match (&ctx.kind, candidate) {
        (ContextKind::MemberAccess(access), SymbolCandidate::Conversion(_)) => (
            Span::new(access.receiver.start, replace.end),
            AnchorDetail::Cast {
                receiver: access.receiver,
                conditional: access.conditional,
            },
        ),
        (ContextKind::MemberAccess(access), SymbolCandidate::Extension(ext)) => {
            match &ext.requires_import {
                Some(namespace) => (
                    replace,
                    AnchorDetail::Import {
                        namespace: namespace.clone(),
                        directives: access.directives.clone(),
                        fallback_insert: access.fallback_import_at,
                    },
                ),
                None => (replace, AnchorDetail::Insert),
            }
        }
        (ContextKind::OverrideDecl(decl), SymbolCandidate::Override(_)) => (
            Span::new(decl.decl_start, replace.end),
            AnchorDetail::Stub {
                decl_start: decl.decl_start,
                indent: decl.indent.clone(),
                written_modifiers: decl.written_modifiers.clone(),
                multiline: decl.multiline,
                interface_qualifier: None,
            },
        ),
        (ContextKind::ExplicitInterface(decl), SymbolCandidate::ExplicitInterface(_)) => (
            Span::new(decl.decl_start, replace.end),
            AnchorDetail::Stub {
                decl_start: decl.decl_start,
                indent: decl.indent.clone(),
                written_modifiers: Vec::new(),
                multiline: false,
                interface_qualifier: Some(decl.qualifier.clone()),
            },
        ),
        _ => (replace, AnchorDetail::Insert),
    };

    Some(Anchor {
        replace,
        guard,
        expected: guard.slice(source)?.to_string(),
        detail,
    })
}

// ---- text shaping ----

/// Display text: the member's simple name; conversions display the target
/// type's minimally qualified spelling; methods and indexers append a
/// canonical parameter-list suffix.
pub(crate) fn display_text(candidate: &SymbolCandidate, model: &SemanticModel) -> String {
    match candidate {
        SymbolCandidate::Conversion(c) => model.display_ty(&c.target),
        SymbolCandidate::Name(c) => c.text.clone(),
        SymbolCandidate::Override(c) => {
            member_display(model, c.member, &c.subst).unwrap_or_default()
        }
        // Extension methods render their call-site parameters; the receiver
        // parameter is implied by the access.
        SymbolCandidate::Extension(c) => model
            .member(c.member)
            .map(|m| {
                let call_params = if m.params.is_empty() {
                    &m.params[..]
                } else {
                    &m.params[1..]
                };
                format!(
                    "{}({})",
                    m.name,
                    param_list(model, call_params, &Subst::identity())
                )
            })
            .unwrap_or_default(),
        _ => candidate
            .member()
            .and_then(|id| member_display(model, id, &Subst::identity()))
            .unwrap_or_default(),
    }
}

fn member_display(model: &SemanticModel, id: semantics::MemberId, subst: &Subst) -> Option<String> {
    let member = model.member(id)?;
    let params = || param_list(model, &member.params, subst);
    Some(match member.kind {
        MemberKind::Method => format!("{}({})", member.name, params()),
        MemberKind::Indexer { .. } => format!("this[{}]", params()),
        _ => member.name.clone(),
    })
}

fn param_list(model: &SemanticModel, params: &[semantics::Param], subst: &Subst) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", model.display_ty(&subst.apply(&p.ty)), p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn filter_text(candidate: &SymbolCandidate, model: &SemanticModel) -> String {
    match candidate {
        SymbolCandidate::Conversion(c) => model.display_ty(&c.target),
        SymbolCandidate::Name(c) => c.text.clone(),
        _ => candidate
            .member()
            .and_then(|id| model.member(id))
            .map(|m| m.name.clone())
            .unwrap_or_default(),
    }
}

fn item_kind(candidate: &SymbolCandidate, model: &SemanticModel) -> CompletionItemKind {
    match candidate {
        SymbolCandidate::Conversion(_) => CompletionItemKind::Operator,
        SymbolCandidate::Name(_) => CompletionItemKind::Identifier,
        SymbolCandidate::Extension(_) => CompletionItemKind::ExtensionMethod,
        _ => match candidate.member().and_then(|id| model.member(id)) {
            Some(member) => match member.kind {
                MemberKind::Method | MemberKind::Constructor | MemberKind::Conversion { .. } => {
                    CompletionItemKind::Method
                }
                MemberKind::Property { .. } => CompletionItemKind::Property,
                MemberKind::Indexer { .. } => CompletionItemKind::Indexer,
                MemberKind::Event => CompletionItemKind::Event,
                MemberKind::Field { .. } => CompletionItemKind::Field,
            },
            None => CompletionItemKind::Identifier,
        },
    }
}

fn filter_tags(candidate: &SymbolCandidate, model: &SemanticModel) -> Vec<FilterTag> {
    match item_kind(candidate, model) {
        CompletionItemKind::Method => vec![FilterTag::Methods],
        CompletionItemKind::ExtensionMethod => {
            vec![FilterTag::Methods, FilterTag::ExtensionMethods]
        }
        CompletionItemKind::Property => vec![FilterTag::Properties],
        CompletionItemKind::Indexer => vec![FilterTag::Properties],
        CompletionItemKind::Field => vec![FilterTag::Fields],
        CompletionItemKind::Event => vec![FilterTag::Events],
        CompletionItemKind::Operator => vec![FilterTag::Operators],
        CompletionItemKind::Identifier => vec![FilterTag::Identifiers],
    }
}

/// Originating namespace/container shown inline next to the item.
fn inline_description(candidate: &SymbolCandidate, model: &SemanticModel) -> Option<String> {
    match candidate {
        SymbolCandidate::Conversion(c) => {
            let member = c.member?;
            let container = model.member(member)?.container;
            Some(model.display_ty(&Ty::named(container)))
        }
        SymbolCandidate::Override(c) => Some(model.display_ty(&Ty::named(c.declaring))),
        SymbolCandidate::ExplicitInterface(c) => Some(model.display_ty(&Ty::named(c.interface))),
        SymbolCandidate::Extension(c) => {
            let def = model.type_def(c.container)?;
            let base = if def.namespace.is_empty() {
                def.name.clone()
            } else {
                def.namespace.clone()
            };
            Some(if c.extra_overloads > 0 {
                format!("{} (+{} overloads)", base, c.extra_overloads)
            } else {
                base
            })
        }
        SymbolCandidate::Initializer(c) => {
            let container = model.member(c.member)?.container;
            Some(model.display_ty(&Ty::named(container)))
        }
        SymbolCandidate::Name(_) => None,
    }
}

/// Text a simple commit inserts (names; never cast or stub commits).
pub(crate) fn insert_text(candidate: &SymbolCandidate, model: &SemanticModel) -> String {
    match candidate {
        SymbolCandidate::Name(c) => c.text.clone(),
        _ => filter_text(candidate, model),
    }
}

fn description_text(candidate: &SymbolCandidate, model: &SemanticModel) -> String {
    let tag = candidate.tag();
    match candidate {
        SymbolCandidate::Conversion(c) => {
            let lifted = if c.lifted { ", lifted" } else { "" };
            format!(
                "explicit conversion from {} to {} ({:?}{lifted})",
                model.display_ty(&c.source),
                model.display_ty(&c.target),
                c.kind,
            )
        }
        SymbolCandidate::Name(c) => format!("suggested name for the new {:?}", c.symbol_kind),
        _ => {
            let Some(member) = candidate.member().and_then(|id| model.member(id)) else {
                return format!("{tag:?}");
            };
            let mut text = format!(
                "{} {}",
                model.display_ty(&member.ret),
                display_text(candidate, model)
            );
            if let Some(doc) = &member.doc {
                text.push('\n');
                text.push_str(doc);
            }
            text
        }
    }
}
