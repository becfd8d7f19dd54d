//! Initializer-member completion: writable fields and settable properties on
//! the initializer's target type, minus statics and members already assigned
//! in the same list.

use rustc_hash::FxHashSet;
use semantics::{MemberKind, Ty};

use super::{InitializerCandidate, ResolveInput, SymbolCandidate};
use crate::context::ContextKind;

pub(super) fn resolve(input: &ResolveInput<'_>) -> Vec<SymbolCandidate> {
    let ContextKind::InitializerMember(ctx) = &input.ctx.kind else {
        return Vec::new();
    };
    let model = input.model;

    // A type following the add-style collection pattern takes element
    // completion instead; member suggestions are suppressed entirely.
    let target_ty = Ty::named(ctx.target);
    if model.is_collection_shaped(&target_ty) && has_add_method(input, ctx.target) {
        return Vec::new();
    }

    // Previously used sibling identifiers can never be re-suggested.
    let excluded: FxHashSet<&str> = ctx.assigned.iter().map(String::as_str).collect();

    let mut seen_names = FxHashSet::default();
    let mut candidates = Vec::new();
    for (declaring, _) in model.base_chain(ctx.target) {
        if input.cancel.is_cancelled() {
            break;
        }
        for (member_id, member) in model.direct_members(declaring) {
            if member.modifiers.is_static || member.associated_with.is_some() {
                continue;
            }
            let assignable = match member.kind {
                MemberKind::Field { is_readonly } => !is_readonly,
                MemberKind::Property { has_setter, .. } => has_setter,
                _ => false,
            };
            if !assignable {
                continue;
            }
            if excluded.contains(member.name.as_str()) {
                continue;
            }
            // Nearest declaration wins when a derived member hides a base one.
            if !seen_names.insert(member.name.clone()) {
                continue;
            }
            candidates.push(SymbolCandidate::Initializer(InitializerCandidate {
                member: member_id,
            }));
        }
    }
    candidates
}

fn has_add_method(input: &ResolveInput<'_>, target: semantics::TypeId) -> bool {
    let model = input.model;
    model.base_chain(target).iter().any(|(type_id, _)| {
        model.direct_members(*type_id).any(|(member_id, member)| {
            member.name == "Add"
                && matches!(member.kind, MemberKind::Method)
                && !member.modifiers.is_static
                && model.accessible_from(input.site, member_id)
        })
    })
}
