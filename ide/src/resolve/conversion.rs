//! Conversion completion on a member-access receiver: user-declared explicit
//! operators up the base chain, the built-in numeric narrowing table, and
//! enum conversions, with nullable lifting.

use rustc_hash::FxHashSet;
use semantics::conversions::{enum_conversion_targets, explicit_numeric_targets};
use semantics::{MemberKind, Ty};

use super::{ConversionCandidate, ConversionKind, ResolveInput, SymbolCandidate};
use crate::context::ContextKind;

pub(super) fn resolve(input: &ResolveInput<'_>) -> Vec<SymbolCandidate> {
    let ContextKind::MemberAccess(ctx) = &input.ctx.kind else {
        return Vec::new();
    };
    let Some(receiver_ty) = &ctx.receiver_ty else {
        // Untyped receiver: this resolver degrades to empty.
        return Vec::new();
    };

    // Lifting applies when the receiver is the nullable wrapper of a value
    // type; conversions then surface nullable targets.
    let (effective, lifted) = match receiver_ty {
        Ty::Nullable(inner) if input.model.is_value_ty(inner) => (inner.as_ref(), true),
        other => (other, false),
    };

    let mut candidates = Vec::new();
    let mut seen_targets = FxHashSet::default();
    let model = input.model;

    // User-declared explicit operators, walking the base chain in one pass.
    // A derived declaration does not hide a base declaration.
    if let Some(origin) = effective.named_def() {
        for (type_id, subst) in model.base_chain(origin) {
            if input.cancel.is_cancelled() {
                return candidates;
            }
            for (member_id, member) in model.direct_members(type_id) {
                let MemberKind::Conversion { implicit } = member.kind else {
                    continue;
                };
                if implicit || !member.is_well_shaped_conversion() {
                    continue;
                }
                // The operand type must be the declaring type itself;
                // anything else is an oracle inconsistency and is skipped.
                let source = subst.apply(&member.params[0].ty);
                if source.named_def() != Some(type_id) {
                    continue;
                }

                let declared_target = subst.apply(&member.ret);
                let target = lift_target(model, declared_target, lifted);
                if !seen_targets.insert(model.display_ty(&target)) {
                    continue;
                }
                candidates.push(SymbolCandidate::Conversion(ConversionCandidate {
                    kind: ConversionKind::User,
                    lifted,
                    source,
                    target,
                    member: Some(member_id),
                }));
            }
        }
    }

    // Built-in numeric narrowing conversions.
    if let Ty::Numeric(kind) = effective {
        for target_kind in explicit_numeric_targets(*kind) {
            if input.cancel.is_cancelled() {
                return candidates;
            }
            let target = lift_target(model, Ty::Numeric(target_kind), lifted);
            if !seen_targets.insert(model.display_ty(&target)) {
                continue;
            }
            candidates.push(SymbolCandidate::Conversion(ConversionCandidate {
                kind: ConversionKind::Numeric,
                lifted,
                source: effective.clone(),
                target,
                member: None,
            }));
        }
    }

    // Enum receivers convert to their underlying kind and every numeric kind
    // reachable from it.
    if let Some(underlying) = model.enum_underlying(effective) {
        for target_kind in enum_conversion_targets(underlying) {
            if input.cancel.is_cancelled() {
                return candidates;
            }
            let target = lift_target(model, Ty::Numeric(target_kind), lifted);
            if !seen_targets.insert(model.display_ty(&target)) {
                continue;
            }
            candidates.push(SymbolCandidate::Conversion(ConversionCandidate {
                kind: ConversionKind::Enum,
                lifted,
                source: effective.clone(),
                target,
                member: None,
            }));
        }
    }

    candidates
}

/// Wraps the declared target in the nullable marker under lifting, unless it
/// already is nullable or is a reference type.
fn lift_target(model: &semantics::SemanticModel, declared: Ty, lifted: bool) -> Ty {
    if !lifted || declared.is_nullable() || !model.is_value_ty(&declared) {
        return declared;
    }
    Ty::nullable(declared)
}
