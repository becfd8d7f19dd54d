use semantics::{NumericKind, Ty};

use super::dsl::{conversion, mark_declared_bodies, model};
use crate::{CancellationToken, CompletionConfig, complete, complete_with_cancellation};

#[test]
fn a_cancelled_session_returns_a_flagged_empty_list() {
    let mut m = model();
    let c = m.class("C");
    m.member(conversion(c, Ty::Numeric(NumericKind::Float)));
    m.value("c", Ty::named(c));
    let built = m.build();

    let token = CancellationToken::new();
    token.cancel();
    let out = complete_with_cancellation("c.", 2, &built, &CompletionConfig::default(), &token);
    assert!(out.cancelled);
    assert!(out.items.is_empty());
}

#[test]
fn unclassifiable_positions_yield_an_empty_list_not_an_error() {
    let built = model().build();
    let out = complete("", 0, &built, &CompletionConfig::default());
    assert!(!out.cancelled);
    assert!(out.items.is_empty());

    let out = complete("x + ", 4, &built, &CompletionConfig::default());
    assert!(out.items.is_empty());
}

#[test]
fn an_untyped_receiver_degrades_to_empty_without_failing() {
    // Nothing classifies `broken(`, so resolvers degrade per-resolver.
    let built = model().build();
    let out = complete("broken.", 7, &built, &CompletionConfig::default());
    assert!(out.items.is_empty());
    assert!(!out.cancelled);
}

#[test]
fn identical_input_produces_an_identical_list() {
    let mut m = model();
    let c = m.class("C");
    m.member(conversion(c, Ty::Numeric(NumericKind::Float)));
    m.member(conversion(c, Ty::String));
    m.value("c", Ty::named(c));
    let mut built = m.build();
    mark_declared_bodies("var c = new C(); c.", &mut built);

    let labels = |out: &crate::CompletionOutput| {
        out.items
            .iter()
            .map(|i| (i.display_text.clone(), i.sort_text.clone()))
            .collect::<Vec<_>>()
    };
    let first = complete("var c = new C(); c.", 19, &built, &CompletionConfig::default());
    let second = complete("var c = new C(); c.", 19, &built, &CompletionConfig::default());
    assert_eq!(labels(&first), labels(&second));
    assert_eq!(first.items.len(), 2);
}

#[test]
fn the_replace_span_covers_the_typed_prefix() {
    let mut m = model();
    let c = m.class("C");
    m.member(conversion(c, Ty::Numeric(NumericKind::Float)));
    m.value("c", Ty::named(c));
    let built = m.build();

    let out = complete("c.flo", 5, &built, &CompletionConfig::default());
    assert_eq!((out.replace.start, out.replace.end), (2, 5));
}
