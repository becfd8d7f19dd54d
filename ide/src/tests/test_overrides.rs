use semantics::{Accessibility, GenericOwner, NumericKind, Ty};

use super::dsl::{getter_property, indexer, method, model, property, t};
use crate::CommitError;

#[test]
fn abstract_member_is_offered_and_stubbed_with_throw() {
    let mut m = model();
    let base = m.class("Base");
    m.member(method("Goo", base, Ty::Void).abstract_());
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    t("class D { override $0 }")
        .model(m.build())
        .expect_labels(&["Goo()"])
        .apply("Goo()")
        .expect_text(
            "class D { public override void Goo() => throw new NotImplementedException();$0 }",
        );
}

#[test]
fn virtual_member_stub_delegates_to_base() {
    let mut m = model();
    let base = m.class("Base");
    m.member(
        method("Render", base, Ty::Void)
            .virtual_()
            .param("depth", Ty::Numeric(NumericKind::Int)),
    );
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    t("class D { override $0 }")
        .model(m.build())
        .expect_labels(&["Render(int depth)"])
        .apply("Render(int depth)")
        .expect_text(
            "class D { public override void Render(int depth) => base.Render(depth);$0 }",
        );
}

#[test]
fn nearest_declaration_wins_and_is_offered_once() {
    let mut m = model();
    let base = m.class("Base");
    m.member(method("Goo", base, Ty::Void).abstract_());
    let mid = m.class("Mid");
    m.set_base(mid, Ty::named(base));
    m.member(method("Goo", mid, Ty::Void).override_());
    let derived = m.class("Derived");
    m.set_base(derived, Ty::named(mid));

    t("class Derived { override $0 }")
        .model(m.build())
        .expect_labels(&["Goo()"])
        .expect_inline_description("Goo()", "Mid");
}

#[test]
fn members_already_overridden_here_are_not_reoffered() {
    let mut m = model();
    let base = m.class("Base");
    m.member(method("Goo", base, Ty::Void).virtual_());
    let d = m.class("D");
    m.set_base(d, Ty::named(base));
    m.member(method("Goo", d, Ty::Void).override_());

    t("class D { override $0 }").model(m.build()).expect_empty();
}

#[test]
fn sealed_static_and_nonvirtual_members_are_excluded() {
    let mut m = model();
    let base = m.class("Base");
    m.member(method("Plain", base, Ty::Void));
    m.member(method("Frozen", base, Ty::Void).virtual_().sealed());
    m.member(method("Shared", base, Ty::Void).virtual_().static_());
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    t("class D { override $0 }").model(m.build()).expect_empty();
}

#[test]
fn sealed_override_in_the_chain_blocks_the_slot() {
    let mut m = model();
    let base = m.class("Base");
    m.member(method("Goo", base, Ty::Void).abstract_());
    let mid = m.class("Mid");
    m.set_base(mid, Ty::named(base));
    m.member(method("Goo", mid, Ty::Void).override_().sealed());
    let derived = m.class("Derived");
    m.set_base(derived, Ty::named(mid));

    t("class Derived { override $0 }")
        .model(m.build())
        .expect_empty();
}

#[test]
fn open_generic_base_members_substitute_the_derived_arguments() {
    let mut m = model();
    let base = m.class("Base");
    m.type_params(base, &["T"]);
    m.member(
        method("Add", base, Ty::Void)
            .abstract_()
            .param("item", Ty::Param(GenericOwner::Type(base), 0)),
    );
    let d = m.class("D");
    m.set_base(d, Ty::Named(base, vec![Ty::Numeric(NumericKind::Int)]));

    t("class D { override $0 }")
        .model(m.build())
        .expect_labels(&["Add(int item)"])
        .apply("Add(int item)")
        .expect_text(
            "class D { public override void Add(int item) => throw new NotImplementedException();$0 }",
        );
}

#[test]
fn property_with_setter_stubs_both_accessors() {
    let mut m = model();
    let base = m.class("Base");
    m.member(property("Name", base, Ty::String).virtual_());
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    let expected = concat!(
        "class D {\n",
        "    public override string Name\n",
        "    {\n",
        "        get => base.Name;\n",
        "        set => base.Name = value;\n",
        "    }$0\n",
        "}",
    );
    t("class D {\n    override $0\n}")
        .model(m.build())
        .apply("Name")
        .expect_text(expected);
}

#[test]
fn getter_only_virtual_property_uses_an_expression_body() {
    let mut m = model();
    let base = m.class("Base");
    m.member(getter_property("Count", base, Ty::Numeric(NumericKind::Int)).virtual_());
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    t("class D { override $0 }")
        .model(m.build())
        .apply("Count")
        .expect_text("class D { public override int Count => base.Count;$0 }");
}

#[test]
fn required_is_preserved_from_the_base_declaration() {
    let mut m = model();
    let base = m.class("Base");
    m.member(property("Name", base, Ty::String).virtual_().required());
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    let applied = t("class D { override $0 }").model(m.build()).apply("Name");
    assert!(applied.updated.contains("public required override string Name"));
}

#[test]
fn written_modifiers_migrate_into_the_stub() {
    let mut m = model();
    let base = m.class("Base");
    m.member(method("Goo", base, Ty::Void).virtual_().access(Accessibility::Protected));
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    // Typed accessibility wins over the base's; `unsafe` is carried along.
    t("class D { public unsafe override $0 }")
        .model(m.build())
        .apply("Goo()")
        .expect_text(
            "class D { public unsafe override void Goo() => base.Goo();$0 }",
        );
}

#[test]
fn base_accessibility_keywords_come_from_the_modifier_table() {
    let mut m = model();
    let base = m.class("Base");
    m.member(
        method("Goo", base, Ty::Void)
            .virtual_()
            .access(Accessibility::ProtectedInternal),
    );
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    t("class D { override $0 }")
        .model(m.build())
        .apply("Goo()")
        .expect_text(
            "class D { protected internal override void Goo() => base.Goo();$0 }",
        );
}

#[test]
fn multiline_modifier_run_rejects_the_commit() {
    let mut m = model();
    let base = m.class("Base");
    m.member(method("Goo", base, Ty::Void).virtual_());
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    let err = t("class D {\n    public\n    override $0\n}")
        .model(m.build())
        .apply_err("Goo()");
    assert_eq!(err, CommitError::MultilineModifiers);
    assert!(!err.is_retryable());
}

#[test]
fn indexer_override_sorts_after_plain_members() {
    let mut m = model();
    let base = m.class("Base");
    m.member(method("Zap", base, Ty::Void).virtual_());
    m.member(indexer(base, Ty::Numeric(NumericKind::Int)).virtual_());
    let d = m.class("D");
    m.set_base(d, Ty::named(base));

    t("class D { override $0 }")
        .model(m.build())
        .expect_labels(&["Zap()", "this[int index]"]);
}
