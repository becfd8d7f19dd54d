//! Stub-generation commits: override and explicit-interface member bodies
//! reproducing the base signature with type parameters substituted.

use semantics::{MemberKind, SemanticModel, Span, Subst};

use super::{CommitEdit, CommitError, escape_ident};
use crate::items::{Anchor, AnchorDetail};
use crate::resolve::{ExplicitImplCandidate, OverrideCandidate};

const THROW_BODY: &str = "throw new NotImplementedException()";
const ACCESS_WORDS: &[&str] = &["public", "private", "protected", "internal"];

pub(super) fn synthesize_override(
    anchor: &Anchor,
    candidate: &OverrideCandidate,
    model: &SemanticModel,
) -> Result<CommitEdit, CommitError> {
    let AnchorDetail::Stub {
        decl_start,
        indent,
        written_modifiers,
        multiline,
        interface_qualifier: None,
    } = &anchor.detail
    else {
        return Err(CommitError::AmbiguousAnchor);
    };
    if *multiline {
        return Err(CommitError::MultilineModifiers);
    }
    let member = model
        .member(candidate.member)
        .ok_or(CommitError::AmbiguousAnchor)?;
    let site = model.site_at(*decl_start);
    let subst = &candidate.subst;

    // Already-written modifiers migrate into the stub; accessibility falls
    // back to the base declaration's keywords when none was typed.
    let mut words: Vec<String> = Vec::new();
    let written_access: Vec<&String> = written_modifiers
        .iter()
        .filter(|w| ACCESS_WORDS.contains(&w.as_str()))
        .collect();
    if written_access.is_empty() {
        words.extend(member.accessibility.keywords().iter().map(|w| w.to_string()));
    } else {
        words.extend(written_access.into_iter().cloned());
    }
    words.extend(
        written_modifiers
            .iter()
            .filter(|w| !ACCESS_WORDS.contains(&w.as_str()))
            .filter(|w| !matches!(w.as_str(), "override" | "required"))
            .cloned(),
    );
    // `required` survives only if already present in source or required on
    // the base member itself.
    if (candidate.required || written_modifiers.iter().any(|w| w == "required"))
        && matches!(member.kind, MemberKind::Property { .. })
    {
        words.push("required".to_string());
    }
    words.push("override".to_string());
    let prefix = format!("{} ", words.join(" "));

    let delegate_to_base = !member.modifiers.is_abstract;
    let text = render_member(model, member, subst, site, &prefix, None, delegate_to_base, indent);
    finish(anchor, *decl_start, text)
}

pub(super) fn synthesize_explicit(
    anchor: &Anchor,
    candidate: &ExplicitImplCandidate,
    model: &SemanticModel,
) -> Result<CommitEdit, CommitError> {
    let AnchorDetail::Stub {
        decl_start,
        indent,
        interface_qualifier: Some(qualifier),
        ..
    } = &anchor.detail
    else {
        return Err(CommitError::AmbiguousAnchor);
    };
    let member = model
        .member(candidate.member)
        .ok_or(CommitError::AmbiguousAnchor)?;
    let site = model.site_at(*decl_start);

    let text = render_member(
        model,
        member,
        &Subst::identity(),
        site,
        "",
        Some(qualifier.as_str()),
        false,
        indent,
    );
    finish(anchor, *decl_start, text)
}

fn finish(anchor: &Anchor, decl_start: u32, text: String) -> Result<CommitEdit, CommitError> {
    if decl_start > anchor.replace.end {
        return Err(CommitError::AmbiguousAnchor);
    }
    let range = Span::new(decl_start, anchor.replace.end);
    let caret = range.start + text.len() as u32;
    Ok(CommitEdit {
        range,
        new_text: text,
        caret,
    })
}

#[allow(clippy::too_many_arguments)]
fn render_member(
    model: &SemanticModel,
    member: &semantics::Member,
    subst: &Subst,
    site: semantics::Site,
    prefix: &str,
    qualifier: Option<&str>,
    delegate_to_base: bool,
    indent: &str,
) -> String {
    let ret = model.display_ty(&subst.apply(&member.ret));
    let name = match qualifier {
        Some(q) => format!("{q}.{}", escape_ident(&member.name)),
        None => escape_ident(&member.name),
    };
    let params = render_params(model, member, subst, site);
    let args = render_args(member);

    match member.kind {
        MemberKind::Method | MemberKind::Constructor | MemberKind::Conversion { .. } => {
            let type_params = if member.type_params.is_empty() {
                String::new()
            } else {
                let names: Vec<&str> =
                    member.type_params.iter().map(|p| p.name.as_str()).collect();
                format!("<{}>", names.join(", "))
            };
            let body = if delegate_to_base {
                format!("base.{}({})", escape_ident(&member.name), args)
            } else {
                THROW_BODY.to_string()
            };
            format!("{prefix}{ret} {name}{type_params}({params}) => {body};")
        }
        MemberKind::Property {
            has_getter,
            has_setter,
        } => {
            let base_ref = format!("base.{}", escape_ident(&member.name));
            if has_getter && !has_setter && delegate_to_base {
                return format!("{prefix}{ret} {name} => {base_ref};");
            }
            let accessors =
                render_accessors(has_getter, has_setter, delegate_to_base, &base_ref, indent);
            format!("{prefix}{ret} {name}\n{indent}{{\n{accessors}\n{indent}}}")
        }
        MemberKind::Indexer {
            has_getter,
            has_setter,
        } => {
            let base_ref = format!("base[{args}]");
            let this_name = match qualifier {
                Some(q) => format!("{q}.this"),
                None => "this".to_string(),
            };
            let accessors =
                render_accessors(has_getter, has_setter, delegate_to_base, &base_ref, indent);
            format!("{prefix}{ret} {this_name}[{params}]\n{indent}{{\n{accessors}\n{indent}}}")
        }
        MemberKind::Event => {
            // Base event accessors are not invokable from an override; both
            // stubs start as not-implemented.
            format!(
                "{prefix}event {ret} {name}\n{indent}{{\n{indent}    add => {THROW_BODY};\n{indent}    remove => {THROW_BODY};\n{indent}}}"
            )
        }
        MemberKind::Field { .. } => format!("{prefix}{ret} {name};"),
    }
}

fn render_accessors(
    has_getter: bool,
    has_setter: bool,
    delegate_to_base: bool,
    base_ref: &str,
    indent: &str,
) -> String {
    let mut lines = Vec::new();
    if has_getter {
        let body = if delegate_to_base {
            base_ref.to_string()
        } else {
            THROW_BODY.to_string()
        };
        lines.push(format!("{indent}    get => {body};"));
    }
    if has_setter {
        let body = if delegate_to_base {
            format!("{base_ref} = value")
        } else {
            THROW_BODY.to_string()
        };
        lines.push(format!("{indent}    set => {body};"));
    }
    lines.join("\n")
}

fn render_params(
    model: &SemanticModel,
    member: &semantics::Member,
    subst: &Subst,
    site: semantics::Site,
) -> String {
    member
        .params
        .iter()
        .map(|p| {
            let mut out = String::new();
            // Parameter attributes come along only when their type is
            // accessible from the implementing site.
            for attr in &p.attrs {
                if model.type_accessible_from(site, *attr) {
                    out.push_str(&format!(
                        "[{}] ",
                        model.display_ty(&semantics::Ty::named(*attr))
                    ));
                }
            }
            out.push_str(&model.display_ty(&subst.apply(&p.ty)));
            out.push(' ');
            out.push_str(&escape_ident(&p.name));
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_args(member: &semantics::Member) -> String {
    member
        .params
        .iter()
        .map(|p| escape_ident(&p.name))
        .collect::<Vec<_>>()
        .join(", ")
}
