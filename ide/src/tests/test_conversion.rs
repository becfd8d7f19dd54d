use semantics::{Accessibility, NumericKind, Ty};

use super::dsl::{conversion, implicit_conversion, method, model, t};
use crate::CompletionItemKind;

#[test]
fn declared_operator_offers_target_type_item_and_cast_commit() {
    let mut m = model();
    let c = m.class("C");
    m.member(conversion(c, Ty::Numeric(NumericKind::Float)));
    m.value("c", Ty::named(c));

    t("var c = new C(); c.$0")
        .model(m.build())
        .expect_labels(&["float"])
        .expect_kind("float", CompletionItemKind::Operator)
        .apply("float")
        .expect_text("var c = new C(); ((float)c)$0");
}

#[test]
fn base_chain_conversions_are_collected_without_hiding() {
    let mut m = model();
    let base = m.class("Base");
    let derived = m.class("Derived");
    m.set_base(derived, Ty::named(base));
    m.member(conversion(base, Ty::Numeric(NumericKind::Int)));
    m.member(conversion(derived, Ty::String));
    m.value("d", Ty::named(derived));

    t("d.$0")
        .model(m.build())
        .expect_labels(&["int", "string"]);
}

#[test]
fn implicit_operators_and_name_lookalikes_are_excluded() {
    let mut m = model();
    let c = m.class("C");
    m.member(implicit_conversion(c, Ty::Numeric(NumericKind::Long)));
    // A plain method that merely bears the operator name.
    m.member(
        method("op_Explicit", c, Ty::Numeric(NumericKind::Float)).static_(),
    );
    m.value("c", Ty::named(c));

    t("c.$0").model(m.build()).expect_empty();
}

#[test]
fn duplicate_targets_collapse_regardless_of_declaration_order() {
    let mut m = model();
    let base = m.class("Base");
    let derived = m.class("Derived");
    m.set_base(derived, Ty::named(base));
    m.member(conversion(derived, Ty::Numeric(NumericKind::Int)));
    m.member(conversion(base, Ty::Numeric(NumericKind::Int)));
    m.value("d", Ty::named(derived));

    t("d.$0").model(m.build()).expect_labels(&["int"]);
}

#[test]
fn numeric_receiver_offers_the_narrowing_table() {
    let mut m = model();
    m.value("i", Ty::Numeric(NumericKind::Int));

    t("i.$0").model(m.build()).expect_labels(&[
        "byte", "char", "sbyte", "short", "uint", "ulong", "ushort",
    ]);
}

#[test]
fn enum_receiver_offers_underlying_and_all_numeric_kinds() {
    let mut m = model();
    let color = m.enum_("Color", NumericKind::Byte);
    m.value("color", Ty::named(color));

    t("color.$0").model(m.build()).expect_labels(&[
        "byte", "char", "decimal", "double", "float", "int", "long", "sbyte", "short", "uint",
        "ulong", "ushort",
    ]);
}

#[test]
fn nullable_receiver_lifts_value_type_targets() {
    let mut m = model();
    let s = m.struct_("S");
    let r = m.struct_("R");
    m.member(conversion(s, Ty::named(r)));
    m.value("s", Ty::nullable(Ty::named(s)));

    t("s.$0")
        .model(m.build())
        .expect_labels(&["R?"])
        .apply("R?")
        .expect_text("((R?)s)$0");
}

#[test]
fn conditional_access_keeps_the_chain_conditional() {
    let mut m = model();
    let s = m.struct_("S");
    let r = m.struct_("R");
    m.member(conversion(s, Ty::named(r)));
    m.value("s", Ty::nullable(Ty::named(s)));

    t("s?.$0")
        .model(m.build())
        .expect_labels(&["R?"])
        .apply("R?")
        .expect_text("((R?)s)?$0");
}

#[test]
fn lifting_skips_reference_and_already_nullable_targets() {
    let mut m = model();
    let s = m.struct_("S");
    m.member(conversion(s, Ty::String));
    m.member(conversion(s, Ty::nullable(Ty::Numeric(NumericKind::Int))));
    m.value("s", Ty::nullable(Ty::named(s)));

    t("s.$0")
        .model(m.build())
        .expect_labels(&["int?", "string"]);
}

#[test]
fn lifted_numeric_conversions_surface_nullable_targets() {
    let mut m = model();
    m.value("f", Ty::nullable(Ty::Numeric(NumericKind::Float)));

    t("f.$0")
        .model(m.build())
        .expect_contains("int?")
        .expect_contains("decimal?")
        .expect_not_contains("double?");
}

#[test]
fn inaccessible_operators_are_filtered_out() {
    let mut m = model();
    let c = m.class("C");
    m.member(conversion(c, Ty::Numeric(NumericKind::Float)).access(Accessibility::Private));
    m.value("c", Ty::named(c));

    t("c.$0").model(m.build()).expect_empty();
}

#[test]
fn parenthesized_receiver_is_wrapped_whole() {
    let mut m = model();
    let c = m.class("C");
    m.member(conversion(c, Ty::Numeric(NumericKind::Float)));
    m.value("(flag ? a : b)", Ty::named(c));

    t("(flag ? a : b).$0")
        .model(m.build())
        .apply("float")
        .expect_text("((float)(flag ? a : b))$0");
}

#[test]
fn typed_prefix_is_replaced_by_the_cast() {
    let mut m = model();
    let c = m.class("C");
    m.member(conversion(c, Ty::Numeric(NumericKind::Float)));
    m.value("c", Ty::named(c));

    t("c.flo$0")
        .model(m.build())
        .apply("float")
        .expect_text("((float)c)$0");
}
