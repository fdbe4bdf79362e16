//! Entity records persisted by the registry.
//!
//! All three records are flat value types with caller-assigned integer ids.
//! The store hands out freshly constructed records on every read; nothing
//! aliases persisted state.

use serde::{Deserialize, Serialize};

/// A real-estate agency. Top-level entity; owns zero or more agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: i64,
    pub name: String,
    pub address: String,
}

/// An agent employed by exactly one agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// References an existing [`Agency`].
    pub agency_id: i64,
}

/// A property listing managed by exactly one agent.
///
/// `status` is a free-text label (e.g. "for sale", "sold", "for rent") and is
/// the only attribute the store ever updates in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub address: String,
    pub price: f64,
    pub status: String,
    /// References an existing [`Agent`].
    pub agent_id: i64,
}
