//! Common types used across the application.

pub mod id;
pub mod pagination;
pub mod source;

pub use id::{AccountId, TransactionId};
pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use source::SourceKind;
