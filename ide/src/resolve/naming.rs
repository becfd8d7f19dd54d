//! Name suggestion for declaration slots: derives identifier candidates from
//! the declared type's simple name, cases them by the configured naming
//! style, and resolves collisions against every binding visible at the
//! position.

use rustc_hash::FxHashSet;
use semantics::naming::{pluralize, split_words};
use semantics::{SemanticModel, Ty};

use super::{NameCandidate, ResolveInput, SymbolCandidate};
use crate::context::ContextKind;

pub(super) fn resolve(input: &ResolveInput<'_>) -> Vec<SymbolCandidate> {
    let ContextKind::DeclarationName(ctx) = &input.ctx.kind else {
        return Vec::new();
    };
    let model = input.model;

    let Some(source_name) = name_source(model, &ctx.declared_ty) else {
        return Vec::new();
    };
    let pluralized = model.is_collection_shaped(&ctx.declared_ty);

    let words = split_words(&source_name);
    if words.is_empty() {
        return Vec::new();
    }

    // Candidate bases: the full name, each maximal suffix, each maximal
    // prefix, longest first within each family.
    let mut bases: Vec<String> = Vec::new();
    bases.push(words.concat());
    for i in 1..words.len() {
        bases.push(words[i..].concat());
    }
    for i in (1..words.len()).rev() {
        bases.push(words[..i].concat());
    }

    let rule = input.config.naming.rule_for(ctx.symbol_kind);
    let taken: FxHashSet<&str> = model
        .bindings_visible_at(input.cursor)
        .into_iter()
        .collect();

    let mut emitted = FxHashSet::default();
    let mut candidates = Vec::new();
    for base in bases {
        if input.cancel.is_cancelled() {
            break;
        }
        let base = if pluralized { pluralize(&base) } else { base };
        let styled = rule.apply(&base);
        if styled.is_empty() {
            continue;
        }
        // Suppressed entirely when the identical identifier already follows
        // the cursor on this declaration.
        if ctx.following_ident.as_deref() == Some(styled.as_str()) {
            continue;
        }
        let unique = free_name(&styled, &taken);
        if !emitted.insert(unique.clone()) {
            continue;
        }
        candidates.push(SymbolCandidate::Name(NameCandidate {
            text: unique,
            symbol_kind: ctx.symbol_kind,
        }));
    }
    candidates
}

/// The simple name the suggestion derives from: the element type for arrays
/// and single-argument collections, with a leading `I` stripped from
/// interface-shaped names.
fn name_source(model: &SemanticModel, declared: &Ty) -> Option<String> {
    match declared {
        Ty::Array(element) => name_source(model, element),
        Ty::Nullable(inner) => name_source(model, inner),
        Ty::Named(id, args) => {
            let def = model.type_def(*id)?;
            if args.len() == 1 && model.is_collection_shaped(declared) {
                if let Some(from_element) = name_source(model, &args[0]) {
                    return Some(from_element);
                }
            }
            let name = def.name.as_str();
            if def.is_interface()
                && let Some(stripped) = name.strip_prefix('I')
                && stripped.chars().next().is_some_and(char::is_uppercase)
            {
                return Some(stripped.to_string());
            }
            Some(name.to_string())
        }
        Ty::Numeric(kind) => Some(kind.keyword().to_string()),
        Ty::Bool => Some("flag".to_string()),
        Ty::String => Some("text".to_string()),
        _ => None,
    }
}

/// Appends the smallest unused positive integer suffix, starting at 1, when
/// the styled name is already bound.
fn free_name(styled: &str, taken: &FxHashSet<&str>) -> String {
    if !taken.contains(styled) {
        return styled.to_string();
    }
    let mut n = 1u32;
    loop {
        let attempt = format!("{styled}{n}");
        if !taken.contains(attempt.as_str()) {
            return attempt;
        }
        n += 1;
    }
}
