//! Read-side filter forwarded to transaction stores.

use chrono::NaiveDate;
use maplebooks_shared::types::AccountId;
use serde::{Deserialize, Serialize};

/// Filter applied when listing raw rows.
///
/// Every field is optional; an empty filter lists everything. How each field
/// is matched is up to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Only rows linked to this account.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// Inclusive lower date bound.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Free-text search.
    #[serde(default)]
    pub search: Option<String>,
}

impl ListFilter {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.account_id.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.search.is_none()
    }
}
