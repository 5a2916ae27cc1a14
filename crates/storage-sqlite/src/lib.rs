//! SQLite storage implementation for the Track My Startup ledger (startups,
//! founders, investment records, recognition records, startup shares).
//!
//! Each repository implements the corresponding port trait from
//! `trackmystartup_core`. Writes that change share-bearing rows persist the
//! row and the recomputed ledger totals in a single transaction.

pub mod db;
pub mod founders;
pub mod investments;
pub mod recognition;
pub mod schema;
pub mod startups;
pub(crate) mod text;

use std::sync::Arc;

use diesel::Connection;

use trackmystartup_core::equity::Ledger;
use trackmystartup_core::errors::{Error, Result};

pub use db::{create_pool, database_url, DbPool};
pub use founders::FounderRepository;
pub use investments::InvestmentRepository;
pub use recognition::RecognitionRepository;
pub use startups::StartupRepository;

/// Snapshot loader wired to the SQLite repositories.
pub fn ledger(pool: &DbPool) -> Ledger {
    Ledger::new(
        Arc::new(FounderRepository::new(pool.clone())),
        Arc::new(InvestmentRepository::new(pool.clone())),
        Arc::new(RecognitionRepository::new(pool.clone())),
        Arc::new(StartupRepository::new(pool.clone())),
    )
}

pub(crate) fn storage_err(err: impl std::fmt::Display) -> Error {
    Error::storage(err.to_string())
}

pub(crate) enum TxnError {
    App(Error),
    Db(diesel::result::Error),
}

impl From<diesel::result::Error> for TxnError {
    fn from(err: diesel::result::Error) -> Self {
        TxnError::Db(err)
    }
}

/// Run `f` inside a SQLite transaction, unwrapping our error type back out of
/// diesel's transaction plumbing. Any `Err` rolls the transaction back.
pub(crate) fn run_in_transaction<T>(
    conn: &mut diesel::SqliteConnection,
    f: impl FnOnce(&mut diesel::SqliteConnection) -> Result<T>,
) -> Result<T> {
    conn.transaction::<T, TxnError, _>(|conn| f(conn).map_err(TxnError::App))
        .map_err(|err| match err {
            TxnError::App(err) => err,
            TxnError::Db(err) => storage_err(err),
        })
}
