use semantics::{GenericOwner, NumericKind, Ty, TypeParamDef};

use super::dsl::{method, model, t};
use crate::CompletionItemKind;

#[test]
fn applicable_extension_is_offered_for_an_imported_container() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc))
            .param("count", Ty::Numeric(NumericKind::Int)),
    );
    m.value("d", Ty::named(doc));

    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_labels(&["Print(int count)"])
        .expect_kind("Print(int count)", CompletionItemKind::ExtensionMethod)
        .expect_inline_description("Print(int count)", "Util.Text");
}

#[test]
fn receiver_type_mismatch_excludes_the_method() {
    let mut m = model();
    let doc = m.class("Doc");
    let other = m.class("Other");
    let ext = m.static_class_in("Util.Text", "OtherExtensions");
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(other)),
    );
    m.value("d", Ty::named(doc));

    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_empty();
}

#[test]
fn base_typed_receiver_parameter_accepts_derived_receivers() {
    let mut m = model();
    let base = m.class("Shape");
    let derived = m.class("Circle");
    m.set_base(derived, Ty::named(base));
    let ext = m.static_class_in("Util.Geometry", "ShapeExtensions");
    m.member(
        method("Area", ext, Ty::Numeric(NumericKind::Double))
            .extension()
            .param("shape", Ty::named(base)),
    );
    m.value("c", Ty::named(derived));

    t("using Util.Geometry;\nclass P { void M() { c.$0 } }")
        .model(m.build())
        .expect_labels(&["Area()"]);
}

#[test]
fn generic_constraints_chain_transitively() {
    let mut m = model();
    let marker = m.interface("IMarker");
    let doc = m.class("Doc");
    m.add_interface(doc, Ty::named(marker));
    let plain = m.class("Plain");
    let ext = m.static_class_in("Util.Text", "MarkerExtensions");

    // void Tag<T, U>(this U value) where U : T where T : IMarker
    let tag = m.member(method("Tag", ext, Ty::Void).extension().param("value", Ty::Unknown));
    let mut member = m.model.member(tag).cloned().expect("member exists");
    member.type_params = vec![
        TypeParamDef {
            name: "T".to_string(),
            constraints: vec![Ty::named(marker)],
        },
        TypeParamDef {
            name: "U".to_string(),
            constraints: vec![Ty::Param(GenericOwner::Member(tag), 0)],
        },
    ];
    member.params[0].ty = Ty::Param(GenericOwner::Member(tag), 1);
    m.model.replace_member(tag, member);

    m.value("d", Ty::named(doc));
    m.value("p", Ty::named(plain));
    let built = m.build();

    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(built.clone())
        .expect_labels(&["Tag()"]);
    t("using Util.Text;\nclass P { void M() { p.$0 } }")
        .model(built)
        .expect_empty();
}

#[test]
fn unimported_containers_respect_the_configuration_gate() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc)),
    );
    m.value("d", Ty::named(doc));
    let built = m.build();

    t("class P { void M() { d.$0 } }")
        .model(built.clone())
        .expect_labels(&["Print()"]);
    t("class P { void M() { d.$0 } }")
        .model(built)
        .config(|c| c.show_unimported_extension_members = false)
        .expect_empty();
}

#[test]
fn committing_an_unimported_extension_also_inserts_the_directive() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc)),
    );
    m.value("d", Ty::named(doc));

    t("using Alpha.One;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .apply("Print()")
        .expect_text(
            "using Alpha.One;\nusing Util.Text;\nclass P { void M() { d.Print$0 } }",
        );
}

#[test]
fn new_directive_keeps_the_existing_ordering() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Beta.Mid", "DocExtensions");
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc)),
    );
    m.value("d", Ty::named(doc));

    t("using Alpha.One;\nusing Gamma.Last;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .apply("Print()")
        .expect_text(
            "using Alpha.One;\nusing Beta.Mid;\nusing Gamma.Last;\nclass P { void M() { d.Print$0 } }",
        );
}

#[test]
fn pure_duplicates_collapse_with_an_overload_count() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc))
            .param("count", Ty::Numeric(NumericKind::Int)),
    );
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc))
            .param("count", Ty::Numeric(NumericKind::Int)),
    );
    m.value("d", Ty::named(doc));

    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_labels(&["Print(int count)"])
        .expect_inline_description("Print(int count)", "Util.Text (+1 overloads)");
}

#[test]
fn identical_signatures_from_distinct_containers_both_appear() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext_a = m.static_class_in("Util.Text", "AExtensions");
    let ext_b = m.static_class_in("Util.More", "BExtensions");
    for ext in [ext_a, ext_b] {
        m.member(
            method("Print", ext, Ty::Void)
                .extension()
                .param("source", Ty::named(doc)),
        );
    }
    m.value("d", Ty::named(doc));

    t("using Util.More;\nusing Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_labels(&["Print()", "Print()"]);
}

#[test]
fn accessible_instance_members_shadow_the_extension() {
    let mut m = model();
    let doc = m.class("Doc");
    m.member(method("Print", doc, Ty::Void));
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc)),
    );
    m.value("d", Ty::named(doc));

    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_empty();
}
