//! Embedded schema migrations.
//!
//! The migrations ship inside the binary and run once at startup, before
//! any query. Re-running them against an up-to-date database is a no-op,
//! so restarts are safe.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// All migrations under `backend/migrations`, compiled in.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while bringing the schema up to date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to run migrations: {message}")]
pub struct MigrationError {
    /// Description of the failure.
    pub message: String,
}

impl MigrationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Apply any pending migrations over a blocking connection.
///
/// Diesel's migration harness is synchronous; callers on an async
/// runtime should wrap this in `spawn_blocking`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration statement fails.
pub fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|err| MigrationError::new(err.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| MigrationError::new(err.to_string()))
}
