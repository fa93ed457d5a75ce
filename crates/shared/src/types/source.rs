//! Transaction source kinds.

use serde::{Deserialize, Serialize};

/// Where a transaction was recorded.
///
/// The source kind decides the sign convention applied during normalization
/// and which side of a reconciliation pair a transaction sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Bank-feed transaction, already signed.
    Bank,
    /// Manually entered expense (always an outflow).
    Expense,
    /// Issued invoice (always an inflow).
    Invoice,
}

impl SourceKind {
    /// Returns the lowercase tag used to prefix transaction IDs.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Expense => "expense",
            Self::Invoice => "invoice",
        }
    }

    /// Returns true for the statement side of a reconciliation pair.
    #[must_use]
    pub const fn is_bank_like(self) -> bool {
        matches!(self, Self::Bank)
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bank" => Ok(Self::Bank),
            "expense" => Ok(Self::Expense),
            "invoice" => Ok(Self::Invoice),
            _ => Err(format!("Unknown source kind: {s}")),
        }
    }
}
