use crate::model::SymbolKind;
use crate::model::naming::{Casing, NamingRule, NamingStyles, pluralize, split_words};

#[test]
fn splits_at_case_transitions() {
    assert_eq!(split_words("ClassB"), ["Class", "B"]);
    assert_eq!(split_words("customerOrder"), ["customer", "Order"]);
    assert_eq!(split_words("HTMLElement"), ["HTML", "Element"]);
    assert_eq!(split_words("snake_case"), ["snake", "case"]);
    assert_eq!(split_words("X"), ["X"]);
}

#[test]
fn camel_rule_lowers_only_the_leading_word() {
    let rule = NamingRule::plain(Casing::Camel);
    assert_eq!(rule.apply("ClassB"), "classB");
    assert_eq!(rule.apply("HTMLElement"), "htmlElement");
    assert_eq!(rule.apply("Order"), "order");
}

#[test]
fn prefix_and_suffix_wrap_the_cased_base() {
    let rule = NamingRule {
        prefix: "_".to_string(),
        suffix: String::new(),
        casing: Casing::Camel,
    };
    assert_eq!(rule.apply("BackingStore"), "_backingStore");
}

#[test]
fn pluralization_covers_the_common_endings() {
    assert_eq!(pluralize("Item"), "Items");
    assert_eq!(pluralize("Index"), "Indexes");
    assert_eq!(pluralize("Entry"), "Entries");
    assert_eq!(pluralize("Day"), "Days");
    assert_eq!(pluralize("Match"), "Matches");
}

#[test]
fn default_styles_follow_convention_per_symbol_kind() {
    let styles = NamingStyles::default();
    assert_eq!(styles.rule_for(SymbolKind::Local).casing, Casing::Camel);
    assert_eq!(styles.rule_for(SymbolKind::Parameter).casing, Casing::Camel);
    assert_eq!(styles.rule_for(SymbolKind::Property).casing, Casing::Pascal);
    assert_eq!(styles.rule_for(SymbolKind::Method).casing, Casing::Pascal);
}
