use semantics::{Browsability, NumericKind, Ty};

use super::dsl::{conversion, method, model, t};

#[test]
fn operator_shaped_items_sort_strictly_last() {
    let mut m = model();
    let doc = m.class("Doc");
    m.member(conversion(doc, Ty::Numeric(NumericKind::Float)));
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(method("zebra", ext, Ty::Void).extension().param("source", Ty::named(doc)));
    m.member(method("Ωmega", ext, Ty::Void).extension().param("source", Ty::named(doc)));
    m.value("d", Ty::named(doc));

    // Ordinal comparison puts ASCII before non-ASCII, and the sentinel-keyed
    // conversion after both.
    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_labels(&["zebra()", "Ωmega()", "float"])
        .expect_last("float");
}

#[test]
fn never_browsable_members_are_dropped() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(
        method("Hidden", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc))
            .browsability(Browsability::Never),
    );
    m.member(
        method("Shown", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc)),
    );
    m.value("d", Ty::named(doc));

    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_labels(&["Shown()"]);
}

#[test]
fn advanced_members_hide_only_under_the_host_option() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(
        method("Rare", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc))
            .browsability(Browsability::Advanced),
    );
    m.value("d", Ty::named(doc));
    let built = m.build();

    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(built.clone())
        .expect_labels(&["Rare()"]);
    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(built)
        .config(|c| c.hide_advanced_members = true)
        .expect_empty();
}

#[test]
fn alphabetical_order_is_ordinal_over_display_text() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    for name in ["beta", "Alpha", "alpha"] {
        m.member(
            method(name, ext, Ty::Void)
                .extension()
                .param("source", Ty::named(doc)),
        );
    }
    m.value("d", Ty::named(doc));

    // Ordinal: uppercase before lowercase.
    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_labels(&["Alpha()", "alpha()", "beta()"]);
}

#[test]
fn descriptions_render_on_demand_with_docs() {
    let mut m = model();
    let doc = m.class("Doc");
    let ext = m.static_class_in("Util.Text", "DocExtensions");
    m.member(
        method("Print", ext, Ty::Void)
            .extension()
            .param("source", Ty::named(doc))
            .doc("Writes the document to the console."),
    );
    m.value("d", Ty::named(doc));

    t("using Util.Text;\nclass P { void M() { d.$0 } }")
        .model(m.build())
        .expect_description_contains("Print()", "Writes the document");
}
