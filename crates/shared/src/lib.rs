//! Shared types, errors, and configuration for MapleBooks.
//!
//! This crate provides common types used across all other crates:
//! - Source-tagged transaction IDs and account IDs
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, MatchingConfig, ServerConfig};
pub use error::{AppError, AppResult};
