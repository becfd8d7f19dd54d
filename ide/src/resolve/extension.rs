//! Extension-method completion: scans statically visible extension
//! containers (including unimported ones when configured), filters by
//! receiver applicability through generic constraints, and collapses pure
//! duplicate signatures into one item with an overload count.

use rustc_hash::FxHashMap;
use semantics::{Member, SemanticModel, Subst, Ty};

use super::{ExtensionCandidate, ResolveInput, SymbolCandidate};
use crate::context::ContextKind;

const MAX_UNIFY_DEPTH: usize = 16;

pub(super) fn resolve(input: &ResolveInput<'_>) -> Vec<SymbolCandidate> {
    let ContextKind::MemberAccess(ctx) = &input.ctx.kind else {
        return Vec::new();
    };
    let Some(receiver_ty) = &ctx.receiver_ty else {
        return Vec::new();
    };
    let model = input.model;

    let mut candidates = Vec::new();
    for container in model.extension_containers() {
        if input.cancel.is_cancelled() {
            break;
        }
        let Some(def) = model.type_def(container) else {
            continue;
        };
        let imported = def.namespace.is_empty() || ctx.imports.contains(&def.namespace);
        if !imported && !input.config.show_unimported_extension_members {
            continue;
        }

        // Pure duplicates within a container collapse to one item carrying
        // an overload count; distinct containers keep their own items.
        let mut by_shape: FxHashMap<String, usize> = FxHashMap::default();
        let mut container_items: Vec<ExtensionCandidate> = Vec::new();

        for (member_id, member) in model.direct_members(container) {
            if !member.modifiers.is_extension
                || !member.modifiers.is_static
                || member.params.is_empty()
            {
                continue;
            }
            if !receiver_applicable(model, receiver_ty, member) {
                continue;
            }
            // An accessible same-name instance member on the receiver's own
            // type shadows the extension.
            if shadowed_by_instance_member(input, receiver_ty, &member.name) {
                continue;
            }

            let shape = shape_key(model, member);
            match by_shape.get(&shape) {
                Some(&slot) => container_items[slot].extra_overloads += 1,
                None => {
                    by_shape.insert(shape, container_items.len());
                    container_items.push(ExtensionCandidate {
                        member: member_id,
                        container,
                        requires_import: (!imported).then(|| def.namespace.clone()),
                        extra_overloads: 0,
                    });
                }
            }
        }
        candidates.extend(container_items.into_iter().map(SymbolCandidate::Extension));
    }
    candidates
}

/// `(name, arity, parameter shape)` key over the call-site parameters (the
/// receiver parameter excluded).
fn shape_key(model: &SemanticModel, member: &Member) -> String {
    let params: Vec<String> = member.params[1..]
        .iter()
        .map(|p| model.display_ty(&p.ty))
        .collect();
    format!(
        "{}/{}/{}",
        member.name,
        member.params.len() - 1,
        params.join(",")
    )
}

/// An extension method applies to receiver type `R` when some type-parameter
/// substitution makes its declared receiver parameter a supertype of `R`,
/// following constraint chains transitively.
fn receiver_applicable(model: &SemanticModel, receiver: &Ty, member: &Member) -> bool {
    let mut subst = Subst::identity();
    declared_accepts(model, receiver, &member.params[0].ty, &mut subst, 0)
}

fn declared_accepts(
    model: &SemanticModel,
    receiver: &Ty,
    declared: &Ty,
    subst: &mut Subst,
    depth: usize,
) -> bool {
    if depth > MAX_UNIFY_DEPTH {
        return false;
    }
    let declared = subst.apply(declared);
    match &declared {
        Ty::Param(owner, index) => {
            subst.insert(*owner, *index, receiver.clone());
            model
                .type_param_constraints(*owner, *index)
                .iter()
                .all(|constraint| match constraint {
                    // A constraint naming another type parameter chains the
                    // requirement through it.
                    Ty::Param(..) => declared_accepts(model, receiver, constraint, subst, depth + 1),
                    other => is_supertype(model, other, receiver, subst, depth + 1),
                })
        }
        other => is_supertype(model, other, receiver, subst, depth + 1),
    }
}

fn is_supertype(
    model: &SemanticModel,
    sup: &Ty,
    sub: &Ty,
    subst: &mut Subst,
    depth: usize,
) -> bool {
    if depth > MAX_UNIFY_DEPTH {
        return false;
    }
    let sup = subst.apply(sup);
    if sup == Ty::Object || sup == Ty::Unknown {
        return true;
    }
    model
        .ancestors(sub)
        .iter()
        .any(|ancestor| unify(model, &sup, ancestor, subst, depth + 1))
}

/// Structural match of a declared pattern (which may contain unbound method
/// type parameters) against a concrete type, binding as it goes.
fn unify(model: &SemanticModel, pattern: &Ty, concrete: &Ty, subst: &mut Subst, depth: usize) -> bool {
    if depth > MAX_UNIFY_DEPTH {
        return false;
    }
    match (pattern, concrete) {
        (Ty::Param(owner, index), _) => match subst.lookup(*owner, *index).cloned() {
            Some(bound) => model.display_ty(&bound) == model.display_ty(concrete),
            None => {
                subst.insert(*owner, *index, concrete.clone());
                true
            }
        },
        (Ty::Named(a, pa), Ty::Named(b, pb)) => {
            a == b
                && pa.len() == pb.len()
                && pa
                    .iter()
                    .zip(pb)
                    .all(|(x, y)| unify(model, x, y, subst, depth + 1))
        }
        (Ty::Array(a), Ty::Array(b)) => unify(model, a, b, subst, depth + 1),
        (Ty::Nullable(a), Ty::Nullable(b)) => unify(model, a, b, subst, depth + 1),
        _ => pattern == concrete,
    }
}

fn shadowed_by_instance_member(input: &ResolveInput<'_>, receiver: &Ty, name: &str) -> bool {
    let Some(origin) = receiver.named_def() else {
        return false;
    };
    let model = input.model;
    model.base_chain(origin).iter().any(|(type_id, _)| {
        model.direct_members(*type_id).any(|(member_id, member)| {
            member.name == name
                && !member.modifiers.is_static
                && model.accessible_from(input.site, member_id)
        })
    })
}
