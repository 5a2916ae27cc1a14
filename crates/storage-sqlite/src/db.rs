//! Connection pool and migration bootstrap.

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

use trackmystartup_core::errors::{Error, Result};

use crate::storage_err;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database location from the environment (`.env` supported), defaulting to a
/// file next to the executable.
pub fn database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "trackmystartup.db".to_string())
}

/// Build a pool and run pending migrations.
///
/// In-memory SQLite databases exist per connection, so for `:memory:` URLs
/// the pool is capped at one connection; every caller then sees the same
/// database.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let max_size = if database_url.contains(":memory:") { 1 } else { 10 };
    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(storage_err)?;

    let mut conn = pool.get().map_err(storage_err)?;
    run_migrations(&mut conn)?;
    info!("[Db] connected to {} (pool size {})", database_url, max_size);
    Ok(pool)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| Error::storage(format!("migrations failed: {}", err)))?;
    Ok(())
}
