//! Naming-style rules and identifier shaping helpers.
//!
//! A naming rule is `{prefix, suffix, casing}` keyed by declaration symbol
//! kind. Word segmentation and pluralization operate on the type's simple
//! name and feed the name-suggestion resolver.

use serde::{Deserialize, Serialize};

use super::SymbolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Casing {
    Camel,
    Pascal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRule {
    pub prefix: String,
    pub suffix: String,
    pub casing: Casing,
}

impl NamingRule {
    pub fn plain(casing: Casing) -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            casing,
        }
    }

    /// Shapes `base` (a PascalCase-ish word run) into an identifier.
    pub fn apply(&self, base: &str) -> String {
        let cased = match self.casing {
            Casing::Camel => camel_case(base),
            Casing::Pascal => pascal_case(base),
        };
        format!("{}{}{}", self.prefix, cased, self.suffix)
    }
}

/// Naming rules per declaration symbol kind, with conventional defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingStyles {
    pub field: NamingRule,
    pub property: NamingRule,
    pub parameter: NamingRule,
    pub local: NamingRule,
    pub method: NamingRule,
}

impl Default for NamingStyles {
    fn default() -> Self {
        Self {
            field: NamingRule::plain(Casing::Camel),
            property: NamingRule::plain(Casing::Pascal),
            parameter: NamingRule::plain(Casing::Camel),
            local: NamingRule::plain(Casing::Camel),
            method: NamingRule::plain(Casing::Pascal),
        }
    }
}

impl NamingStyles {
    pub fn rule_for(&self, kind: SymbolKind) -> &NamingRule {
        match kind {
            SymbolKind::Field => &self.field,
            SymbolKind::Property => &self.property,
            SymbolKind::Parameter => &self.parameter,
            SymbolKind::Local => &self.local,
            SymbolKind::Method => &self.method,
        }
    }
}

/// Splits an identifier into sub-words at case-transition boundaries.
///
/// `ClassB` -> `[Class, B]`; `HTMLElement` -> `[HTML, Element]`;
/// `snake_case` -> `[snake, case]`.
pub fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().filter(|c| *c != '@').collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        let prev_lower = i > 0 && chars[i - 1].is_lowercase();
        let prev_upper = i > 0 && chars[i - 1].is_uppercase();
        let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());

        // lower->Upper starts a word; an acronym run ends one word before
        // its last capital when a lowercase letter follows (HTMLElement).
        let boundary = (c.is_uppercase() && prev_lower)
            || (c.is_uppercase() && prev_upper && next_lower);
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Naive English pluralization, applied to collection-typed suggestions.
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if before.is_some_and(|c| !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{stem}ies");
        }
    }
    format!("{word}s")
}

fn camel_case(base: &str) -> String {
    let mut chars = base.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    // An all-caps leading acronym lowercases wholesale (HTMLElement ->
    // htmlElement); otherwise only the first scalar drops case.
    let words = split_words(base);
    if let Some(first_word) = words.first()
        && first_word.len() > 1
        && first_word.chars().all(|c| c.is_uppercase())
    {
        let rest: String = words[1..].concat();
        return format!("{}{}", first_word.to_lowercase(), rest);
    }

    let mut out = String::with_capacity(base.len());
    out.extend(first.to_lowercase());
    out.push_str(chars.as_str());
    out
}

fn pascal_case(base: &str) -> String {
    let mut chars = base.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(base.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    out
}
