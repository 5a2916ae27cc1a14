//! Core domain logic for Track My Startup: the cap table ledger, investment
//! and recognition records, entry validation, and the services that keep the
//! startup's derived totals consistent with the persisted rows.
//!
//! Storage is reached only through the repository traits each module exports;
//! the `trackmystartup_storage_sqlite` crate provides the SQLite
//! implementation.

pub mod equity;
pub mod errors;
pub mod events;
pub mod founders;
pub mod investments;
pub mod recognition;
pub mod retry;
pub mod startups;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{Error, Result};
