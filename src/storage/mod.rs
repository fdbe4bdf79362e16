//! SQLite storage layer for Casabase.
//!
//! Provides:
//! - Idempotent schema initialization with enforced foreign keys
//! - The registry store: typed CRUD, join lookups, and the per-agency
//!   best-agent aggregate

pub mod schema;
pub mod store;
