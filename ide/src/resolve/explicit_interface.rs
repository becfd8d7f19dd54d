//! Explicit-interface completion: members declared directly on the named
//! interface, each property/event represented once (never its accessors).

use super::{ExplicitImplCandidate, ResolveInput, SymbolCandidate};
use crate::context::ContextKind;

pub(super) fn resolve(input: &ResolveInput<'_>) -> Vec<SymbolCandidate> {
    let ContextKind::ExplicitInterface(ctx) = &input.ctx.kind else {
        return Vec::new();
    };
    let model = input.model;

    let mut candidates = Vec::new();
    for (member_id, member) in model.direct_members(ctx.interface) {
        if input.cancel.is_cancelled() {
            break;
        }
        if member.modifiers.is_static || member.associated_with.is_some() {
            continue;
        }
        // A sealed default implementation cannot be reimplemented.
        if member.modifiers.is_sealed {
            continue;
        }
        if !model.accessible_from(input.site, member_id) {
            continue;
        }
        candidates.push(SymbolCandidate::ExplicitInterface(ExplicitImplCandidate {
            member: member_id,
            interface: ctx.interface,
        }));
    }
    candidates
}
