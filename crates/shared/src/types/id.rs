//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `AccountId` where a
//! `TransactionId` is expected. Both wrap the opaque string keys handed out by
//! the persistence layer.

use serde::{Deserialize, Serialize};

use super::source::SourceKind;

/// Macro to generate typed string ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an ID from an existing key.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

typed_id!(
    AccountId,
    "Identifier of the ledger stream (bank account) a transaction belongs to."
);
typed_id!(
    TransactionId,
    "Source-tagged transaction identifier, unique across the merged pool."
);

impl AccountId {
    /// Sentinel account for manual entries not linked to a bank account.
    pub const UNASSIGNED: &'static str = "unassigned";

    /// Returns the sentinel account used for entries without a bank account.
    #[must_use]
    pub fn unassigned() -> Self {
        Self(Self::UNASSIGNED.to_string())
    }

    /// Returns true if this is the unassigned sentinel.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.0 == Self::UNASSIGNED
    }
}

impl TransactionId {
    /// Builds the globally unique ID `"<tag>-<raw>"` for a source record.
    #[must_use]
    pub fn tagged(kind: SourceKind, raw_id: &str) -> Self {
        Self(format!("{}-{raw_id}", kind.tag()))
    }

    /// Splits the ID back into its source kind and raw persistence key.
    ///
    /// Returns `None` when the prefix is not a known source tag.
    #[must_use]
    pub fn split(&self) -> Option<(SourceKind, &str)> {
        let (tag, raw) = self.0.split_once('-')?;
        let kind = tag.parse::<SourceKind>().ok()?;
        if raw.is_empty() {
            return None;
        }
        Some((kind, raw))
    }
}
