//! Verb synonym table resolving surface forms to canonical actions.
//!
//! The table is plain immutable data. Callers build it once (usually via
//! [`SynonymTable::spanish`]) and hand it to the parser, which derives its
//! keyword alternation from the same entries so the two never drift apart.

use std::collections::BTreeMap;

/// Canonical token for the "add stock" action.
pub const CANONICAL_ADD: &str = "agregar";

/// Canonical token for the "remove stock" action.
pub const CANONICAL_REMOVE: &str = "quitar";

const SPANISH_SYNONYMS: &[(&str, &str)] = &[
    ("agregame", CANONICAL_ADD),
    ("añadime", CANONICAL_ADD),
    ("añadir", CANONICAL_ADD),
    ("sumar", CANONICAL_ADD),
    ("agregar", CANONICAL_ADD),
    ("eliminar", CANONICAL_REMOVE),
    ("borrar", CANONICAL_REMOVE),
    ("quitar", CANONICAL_REMOVE),
];

/// Classification of a canonical action token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Accumulate quantity for a product.
    Add,
    /// Remove a product. Recognised but carries no ledger semantics.
    Remove,
    /// Token outside the canonical vocabulary.
    Other,
}

impl ActionKind {
    /// Classify a canonical token.
    ///
    /// # Examples
    /// ```
    /// use stock_intent::{ActionKind, CANONICAL_ADD};
    ///
    /// assert_eq!(ActionKind::from_canonical(CANONICAL_ADD), ActionKind::Add);
    /// assert_eq!(ActionKind::from_canonical("vender"), ActionKind::Other);
    /// ```
    #[must_use]
    pub fn from_canonical(token: &str) -> Self {
        match token {
            CANONICAL_ADD => Self::Add,
            CANONICAL_REMOVE => Self::Remove,
            _ => Self::Other,
        }
    }
}

/// Immutable mapping from action surface forms to canonical tokens.
///
/// Keys and values are stored lowercased. Every canonical value is also a
/// key mapping to itself, so identity lookups never fall through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    entries: BTreeMap<String, String>,
}

impl SynonymTable {
    /// Build the fixed Spanish vocabulary.
    #[must_use]
    pub fn spanish() -> Self {
        Self::from_pairs(SPANISH_SYNONYMS.iter().copied())
    }

    /// Build a table from `(surface form, canonical)` pairs.
    ///
    /// Both sides are lowercased. Later pairs override earlier ones for the
    /// same surface form.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = BTreeMap::new();
        for (surface, canonical) in pairs {
            let canonical_lower = canonical.as_ref().to_lowercase();
            entries
                .entry(canonical_lower.clone())
                .or_insert_with(|| canonical_lower.clone());
            entries.insert(surface.as_ref().to_lowercase(), canonical_lower);
        }
        Self { entries }
    }

    /// Resolve `token` to its canonical form, or return it unchanged.
    ///
    /// Matching is exact after lowercasing; there is no stemming.
    ///
    /// # Examples
    /// ```
    /// use stock_intent::SynonymTable;
    ///
    /// let table = SynonymTable::spanish();
    /// assert_eq!(table.normalize("Añadime"), "agregar");
    /// assert_eq!(table.normalize("vender"), "vender");
    /// ```
    #[must_use]
    pub fn normalize<'a>(&'a self, token: &'a str) -> &'a str {
        self.entries
            .get(token.to_lowercase().as_str())
            .map_or(token, String::as_str)
    }

    /// Every surface form in the table, longest first.
    ///
    /// Ordering by length keeps a regex alternation from stopping at a
    /// shorter keyword that prefixes a longer one.
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keywords.sort_by(|left, right| {
            right
                .chars()
                .count()
                .cmp(&left.chars().count())
                .then_with(|| left.cmp(right))
        });
        keywords
    }

    /// Number of surface forms known to the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::spanish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for synonym resolution.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("agregame", CANONICAL_ADD)]
    #[case("añadime", CANONICAL_ADD)]
    #[case("añadir", CANONICAL_ADD)]
    #[case("sumar", CANONICAL_ADD)]
    #[case("agregar", CANONICAL_ADD)]
    #[case("eliminar", CANONICAL_REMOVE)]
    #[case("borrar", CANONICAL_REMOVE)]
    #[case("quitar", CANONICAL_REMOVE)]
    fn spanish_table_resolves_every_variant(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(SynonymTable::spanish().normalize(token), expected);
    }

    #[rstest]
    #[case("SUMAR")]
    #[case("Agregame")]
    fn lookup_ignores_case(#[case] token: &str) {
        assert_eq!(SynonymTable::spanish().normalize(token), CANONICAL_ADD);
    }

    #[rstest]
    #[case("vender")]
    #[case("agregando")]
    #[case("")]
    fn unknown_tokens_pass_through(#[case] token: &str) {
        assert_eq!(SynonymTable::spanish().normalize(token), token);
    }

    #[test]
    fn keywords_are_longest_first() {
        let table = SynonymTable::spanish();
        let keywords = table.keywords();

        assert_eq!(keywords.len(), 8);
        let lengths: Vec<usize> = keywords.iter().map(|word| word.chars().count()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|left, right| right.cmp(left));
        assert_eq!(lengths, sorted);
    }

    #[test]
    fn canonical_values_map_to_themselves() {
        let table = SynonymTable::from_pairs([("vendeme", "vender")]);

        assert_eq!(table.normalize("vender"), "vender");
        assert_eq!(table.normalize("vendeme"), "vender");
        assert_eq!(table.len(), 2);
    }

    #[rstest]
    #[case(CANONICAL_ADD, ActionKind::Add)]
    #[case(CANONICAL_REMOVE, ActionKind::Remove)]
    #[case("sumar", ActionKind::Other)]
    fn action_kind_classifies_canonical_tokens(#[case] token: &str, #[case] expected: ActionKind) {
        assert_eq!(ActionKind::from_canonical(token), expected);
    }
}
