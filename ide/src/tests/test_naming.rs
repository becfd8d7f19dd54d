use semantics::{Casing, NamingRule, Ty};

use super::dsl::{method, model, t};
use crate::CompletionItemKind;

#[test]
fn collisions_take_the_smallest_unused_suffix() {
    let mut m = model();
    m.class("ClassB");
    m.class("P");
    m.bind("classB");
    m.bind("classB1");

    t("class P { void M() { ClassB $0 } }")
        .model(m.build())
        .expect_labels(&["b", "class", "classB2"])
        .expect_not_contains("classB")
        .expect_not_contains("classB1")
        .expect_kind("classB2", CompletionItemKind::Identifier);
}

#[test]
fn full_name_suffixes_and_prefixes_are_all_derived() {
    let mut m = model();
    m.class("CustomerOrderList");
    m.class("P");

    t("class P { void M() { CustomerOrderList $0 } }")
        .model(m.build())
        .expect_contains("customerOrderList")
        .expect_contains("orderList")
        .expect_contains("list")
        .expect_contains("customerOrder")
        .expect_contains("customer");
}

#[test]
fn interface_shaped_names_drop_the_leading_i() {
    let mut m = model();
    m.interface("IWidget");
    m.class("P");

    t("class P { void M() { IWidget $0 } }")
        .model(m.build())
        .expect_contains("widget")
        .expect_not_contains("iWidget");
}

#[test]
fn collection_typed_declarations_pluralize() {
    let mut m = model();
    m.class("Widget");
    m.class("P");

    t("class P { void M() { Widget[] $0 } }")
        .model(m.build())
        .expect_labels(&["widgets"]);
}

#[test]
fn casing_follows_the_rule_for_the_declaration_kind() {
    let mut m = model();
    m.class("Widget");
    m.class("P");
    let built = m.build();

    // Locals default to camelCase; fields follow the configured rule.
    t("class P { void M() { Widget $0 } }")
        .model(built.clone())
        .expect_labels(&["widget"]);
    t("class P { Widget $0 }")
        .model(built.clone())
        .expect_labels(&["widget"]);
    t("class P { Widget $0 }")
        .model(built)
        .config(|c| c.naming.field = NamingRule {
            prefix: "_".to_string(),
            suffix: String::new(),
            casing: Casing::Camel,
        })
        .expect_labels(&["_widget"]);
}

#[test]
fn parameter_slots_use_the_parameter_rule() {
    let mut m = model();
    m.class("Widget");
    m.class("P");

    t("class P { void M(Widget $0) }")
        .model(m.build())
        .expect_labels(&["widget"]);
}

#[test]
fn an_identical_identifier_after_the_cursor_suppresses_the_suggestion() {
    let mut m = model();
    m.class("Widget");
    m.class("P");

    t("class P { void M() { Widget $0 widget } }")
        .model(m.build())
        .expect_empty();
}

#[test]
fn commit_inserts_the_identifier_escaping_keywords() {
    let mut m = model();
    m.class("Class");
    m.class("P");

    t("class P { void M() { Class $0 } }")
        .model(m.build())
        .apply("class")
        .expect_text("class P { void M() { Class @class$0 } }");
}

#[test]
fn bound_method_names_also_collide() {
    let mut m = model();
    m.class("Widget");
    m.class("P");
    m.member(method("widget", m.model.resolve_type_path("P").expect("P exists"), Ty::Void));
    m.bind("widget");

    t("class P { void M() { Widget $0 } }")
        .model(m.build())
        .expect_labels(&["widget1"]);
}
