//! Filter & rank: accessibility and browsability filtering, nearest-wins
//! dedup, and deterministic sort-key assignment.
//!
//! Plain items sort alphabetically by display text under ordinal comparison.
//! Operator-shaped items (conversions, indexers) are keyed behind a reserved
//! sentinel scalar so they sort strictly after every identifier, whatever
//! its script.

use rustc_hash::FxHashSet;
use semantics::{Browsability, MemberKind, SemanticModel, Site};

use crate::CompletionConfig;
use crate::items;
use crate::resolve::SymbolCandidate;

/// Last plane-16 private-use scalar: ordinally above every identifier
/// character under byte-wise UTF-8 comparison.
pub(crate) const SORT_SENTINEL: char = '\u{10FFFD}';

/// Fixed-width tie-break buckets within the sentinel group.
const BUCKET_CONVERSION: u32 = 0;
const BUCKET_INDEXER: u32 = 1;

#[derive(Debug, Clone)]
pub(crate) struct RankedCandidate {
    pub candidate: SymbolCandidate,
    pub sort_text: String,
}

pub(crate) fn filter_and_rank(
    candidates: Vec<SymbolCandidate>,
    model: &SemanticModel,
    site: Site,
    config: &CompletionConfig,
) -> Vec<RankedCandidate> {
    let mut seen = FxHashSet::default();
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .filter(|candidate| visible(candidate, model, site, config))
        // Nearest declaration first in resolver output; later duplicates of
        // the same signature drop here.
        .filter(|candidate| seen.insert(dedup_key(candidate, model)))
        .map(|candidate| {
            let sort_text = sort_text(&candidate, model);
            RankedCandidate {
                candidate,
                sort_text,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.sort_text.cmp(&b.sort_text).then_with(|| {
            items::display_text(&a.candidate, model).cmp(&items::display_text(&b.candidate, model))
        })
    });
    ranked
}

fn visible(
    candidate: &SymbolCandidate,
    model: &SemanticModel,
    site: Site,
    config: &CompletionConfig,
) -> bool {
    let Some(member_id) = candidate.member() else {
        // Built-in conversions and name suggestions carry no symbol.
        return true;
    };
    let Some(member) = model.member(member_id) else {
        // Oracle inconsistency: exclude the single candidate.
        return false;
    };

    match member.browsability {
        Browsability::Never => return false,
        Browsability::Advanced if config.hide_advanced_members => return false,
        _ => {}
    }

    model.accessible_from(site, member_id)
}

fn dedup_key(candidate: &SymbolCandidate, model: &SemanticModel) -> String {
    let tag = format!("{:?}", candidate.tag());
    match candidate {
        SymbolCandidate::Conversion(c) => format!("{tag}#{}", model.display_ty(&c.target)),
        SymbolCandidate::Name(c) => format!("{tag}#{}", c.text),
        // Extension dedup happened per-container in the resolver; identical
        // signatures from distinct containers are both legitimate items.
        SymbolCandidate::Extension(c) => format!("{tag}#{}#{}", c.container.0, c.member.0),
        _ => {
            let Some(member) = candidate.member().and_then(|id| model.member(id)) else {
                return tag;
            };
            let params: Vec<String> = member
                .params
                .iter()
                .map(|p| model.display_ty(&p.ty))
                .collect();
            format!("{tag}#{}#{}", member.name, params.join(","))
        }
    }
}

fn sort_text(candidate: &SymbolCandidate, model: &SemanticModel) -> String {
    match candidate {
        SymbolCandidate::Conversion(c) => {
            format!(
                "{SORT_SENTINEL}{BUCKET_CONVERSION:03}{}",
                model.display_ty(&c.target)
            )
        }
        _ if is_indexer(candidate, model) => {
            format!(
                "{SORT_SENTINEL}{BUCKET_INDEXER:03}{}",
                items::display_text(candidate, model)
            )
        }
        other => items::display_text(other, model),
    }
}

fn is_indexer(candidate: &SymbolCandidate, model: &SemanticModel) -> bool {
    candidate
        .member()
        .and_then(|id| model.member(id))
        .is_some_and(|member| matches!(member.kind, MemberKind::Indexer { .. }))
}
