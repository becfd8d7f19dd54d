//! Override completion: walks the base chain nearest-first and offers the
//! overridable members not yet overridden in the current type. Per
//! name+signature the nearest declaration wins.

use rustc_hash::FxHashSet;
use semantics::{Member, MemberKind, SemanticModel, Subst};

use super::{OverrideCandidate, ResolveInput, SymbolCandidate};
use crate::context::ContextKind;

pub(super) fn resolve(input: &ResolveInput<'_>) -> Vec<SymbolCandidate> {
    let ContextKind::OverrideDecl(ctx) = &input.ctx.kind else {
        return Vec::new();
    };
    let model = input.model;
    let chain = model.base_chain(ctx.current_type);

    // Signatures the current type already declares are excluded up front.
    let mut claimed: FxHashSet<String> = model
        .direct_members(ctx.current_type)
        .filter(|(_, m)| m.associated_with.is_none())
        .map(|(_, m)| signature_key(model, m, &Subst::identity()))
        .collect();

    let mut candidates = Vec::new();
    for (declaring, subst) in chain.iter().skip(1) {
        if input.cancel.is_cancelled() {
            break;
        }
        for (member_id, member) in model.direct_members(*declaring) {
            if member.associated_with.is_some() {
                continue;
            }
            if matches!(
                member.kind,
                MemberKind::Constructor | MemberKind::Conversion { .. } | MemberKind::Field { .. }
            ) {
                continue;
            }
            if member.modifiers.is_static {
                continue;
            }

            let key = signature_key(model, member, subst);
            if !member.is_overridable() {
                // Sealed declarations still claim their slot so a farther
                // base declaration is not resurrected.
                if member.modifiers.is_sealed {
                    claimed.insert(key);
                }
                continue;
            }
            // Nearest wins: the first declaration claims the signature.
            if !claimed.insert(key) {
                continue;
            }

            candidates.push(SymbolCandidate::Override(OverrideCandidate {
                member: member_id,
                declaring: *declaring,
                subst: subst.clone(),
                required: member.modifiers.is_required,
            }));
        }
    }
    candidates
}

/// Name + member shape + parameter types, rendered in the walk origin's
/// terms so keys from different chain depths compare.
fn signature_key(model: &SemanticModel, member: &Member, subst: &Subst) -> String {
    let shape = match &member.kind {
        MemberKind::Method => "method",
        MemberKind::Property { .. } => "property",
        MemberKind::Indexer { .. } => "indexer",
        MemberKind::Event => "event",
        MemberKind::Field { .. } => "field",
        MemberKind::Constructor => "ctor",
        MemberKind::Conversion { .. } => "conversion",
    };
    let params: Vec<String> = member
        .params
        .iter()
        .map(|p| model.display_ty(&subst.apply(&p.ty)))
        .collect();
    format!("{}#{}#{}", member.name, shape, params.join(","))
}
