use semantics::{NumericKind, SemanticModel, Ty};

use super::dsl::{mark_declared_bodies, model};
use crate::context::analyze;

fn context_label(fixture: &str, mut model: SemanticModel) -> &'static str {
    let cursor = fixture.find("$0").expect("fixture must contain $0 marker");
    let source = fixture.replace("$0", "");
    mark_declared_bodies(&source, &mut model);
    let tokens = semantics::lex(&source);
    analyze(&source, &tokens, cursor as u32, &model).kind.label()
}

#[test]
fn dot_after_typed_value_is_member_access() {
    let mut m = model();
    let c = m.class("C");
    m.value("c", Ty::named(c));
    let model = m.build();

    assert_eq!(context_label("c.$0", model.clone()), "member-access");
    assert_eq!(context_label("c?.$0", model.clone()), "member-access");
    assert_eq!(context_label("c.Val$0", model), "member-access");
}

#[test]
fn literal_receivers_do_not_trigger_member_access() {
    let m = model().build();
    // `1.` could still become a float literal; `"s"` is a string literal.
    assert_eq!(context_label("1.$0", m.clone()), "none");
    assert_eq!(context_label("\"s\".$0", m), "none");
}

#[test]
fn type_and_namespace_receivers_are_excluded() {
    let mut m = model();
    let c = m.class("C");
    m.type_name("C", c);
    m.namespace_name("Sys");
    let model = m.build();

    assert_eq!(context_label("C.$0", model.clone()), "none");
    assert_eq!(context_label("Sys.$0", model), "none");
}

#[test]
fn chained_receiver_stays_member_access() {
    let mut m = model();
    let c = m.class("C");
    m.value("a.b(1).c", Ty::named(c));
    let model = m.build();

    assert_eq!(context_label("a.b(1).c.$0", model), "member-access");
}

#[test]
fn override_keyword_inside_type_body_is_override_context() {
    let mut m = model();
    m.class("D");
    let model = m.build();

    assert_eq!(
        context_label("class D { override $0 }", model.clone()),
        "override-declaration"
    );
    assert_eq!(
        context_label("class D { public override Go$0 }", model.clone()),
        "override-declaration"
    );
    // Outside any type body the keyword means nothing.
    assert_eq!(context_label("override $0", model), "none");
}

#[test]
fn interface_qualifier_dot_in_type_body_is_explicit_interface() {
    let mut m = model();
    m.interface("IFoo");
    m.class("C");
    let model = m.build();

    assert_eq!(
        context_label("class C { IFoo.$0 }", model),
        "explicit-interface"
    );
}

#[test]
fn non_interface_qualifier_in_type_body_is_nothing() {
    let mut m = model();
    m.class("Helper");
    m.class("C");
    let model = m.build();

    assert_eq!(context_label("class C { Helper.$0 }", model), "none");
}

#[test]
fn open_brace_after_new_is_initializer_context() {
    let mut m = model();
    m.class("Gadget");
    m.class("P");
    let model = m.build();

    assert_eq!(
        context_label("class P { void M() { var g = new Gadget { $0 }; } }", model.clone()),
        "initializer-member"
    );
    assert_eq!(
        context_label(
            "class P { void M() { var g = new Gadget { Name = 1, $0 }; } }",
            model
        ),
        "initializer-member"
    );
}

#[test]
fn type_reference_before_identifier_slot_is_declaration_name() {
    let mut m = model();
    m.class("Widget");
    m.class("P");
    let model = m.build();

    assert_eq!(
        context_label("class P { void M() { Widget $0 } }", model.clone()),
        "declaration-name"
    );
    assert_eq!(
        context_label("class P { void M(Widget $0) }", model.clone()),
        "declaration-name"
    );
    assert_eq!(
        context_label("class P { Widget $0 }", model.clone()),
        "declaration-name"
    );
    // An unknown type name is not a declaration slot.
    assert_eq!(
        context_label("class P { void M() { Missing $0 } }", model),
        "none"
    );
}

#[test]
fn numeric_keyword_and_suffixed_types_introduce_name_slots() {
    let mut m = model();
    m.class("Widget");
    m.class("P");
    m.value("int", Ty::Numeric(NumericKind::Int));
    let model = m.build();

    assert_eq!(
        context_label("class P { void M() { int $0 } }", model.clone()),
        "declaration-name"
    );
    assert_eq!(
        context_label("class P { void M() { Widget[] $0 } }", model.clone()),
        "declaration-name"
    );
    assert_eq!(
        context_label("class P { void M() { Widget? $0 } }", model),
        "declaration-name"
    );
}

#[test]
fn empty_source_has_no_context() {
    assert_eq!(context_label("$0", model().build()), "none");
}
