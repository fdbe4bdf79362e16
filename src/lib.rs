//! Casabase: an embedded SQLite registry for real-estate listings.
//!
//! Casabase persists three related entities — agencies, the agents who work
//! for them, and the properties those agents manage — behind a single typed
//! store bound to one SQLite database file.
//!
//! # Modules
//!
//! - [`error`]: Store error taxonomy
//! - [`model`]: Entity records (Agency, Agent, Property)
//! - [`storage`]: SQLite schema and the registry store itself
//!
//! # Example
//!
//! ```no_run
//! use casabase::{Agency, RegistryStore};
//!
//! # fn main() -> Result<(), casabase::StoreError> {
//! let store = RegistryStore::open("registry.db")?;
//! store.add_agency(&Agency {
//!     id: 1,
//!     name: "Harbor Realty".into(),
//!     address: "1 Pier Road".into(),
//! })?;
//! store.close()?;
//! # Ok(())
//! # }
//! ```

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions,    // storage::store::RegistryStore is fine
    clippy::must_use_candidate,         // Not all functions need #[must_use]
    clippy::missing_errors_doc,         // Error docs can be verbose
    clippy::needless_raw_string_hashes  // r#""# is fine for SQL
)]

pub mod error;
pub mod model;
pub mod storage;

pub use error::StoreError;
pub use model::{Agency, Agent, Property};
pub use storage::store::RegistryStore;
