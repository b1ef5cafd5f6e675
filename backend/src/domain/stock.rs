//! Stock ledger value types.

use std::fmt;

/// Stable identifier of a chat user, as assigned by the chat platform.
///
/// Every ledger row is scoped by this value; no operation ever reads or
/// writes another user's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a platform user identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw platform identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the conversation a reply is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(i64);

impl ChatId {
    /// Wrap a platform chat identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw platform identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One `(product, quantity)` row of a user's stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLine {
    /// Product label exactly as it was first stored.
    pub product: String,
    /// Accumulated quantity. Never negative.
    pub quantity: u64,
}

impl StockLine {
    /// Build a stock line.
    pub fn new(product: impl Into<String>, quantity: u64) -> Self {
        Self {
            product: product.into(),
            quantity,
        }
    }
}

/// Whether an upsert created the row or incremented an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertKind {
    /// No row existed for `(user, product)`; one was created.
    Inserted,
    /// An existing row had its quantity incremented.
    Incremented,
}

/// Result of adding stock for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// What happened to the row.
    pub kind: UpsertKind,
    /// Quantity stored after the write.
    pub quantity: u64,
}

impl UpsertOutcome {
    /// Outcome for a freshly created row.
    pub const fn inserted(quantity: u64) -> Self {
        Self {
            kind: UpsertKind::Inserted,
            quantity,
        }
    }

    /// Outcome for an incremented row.
    pub const fn incremented(quantity: u64) -> Self {
        Self {
            kind: UpsertKind::Incremented,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_display_their_raw_value() {
        assert_eq!(UserId::new(-42).to_string(), "-42");
        assert_eq!(ChatId::new(7).to_string(), "7");
    }

    #[test]
    fn outcome_constructors_set_the_kind() {
        assert_eq!(UpsertOutcome::inserted(3).kind, UpsertKind::Inserted);
        assert_eq!(UpsertOutcome::incremented(8).quantity, 8);
    }
}
