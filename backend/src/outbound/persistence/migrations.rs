//! Startup schema migrations.
//!
//! Migrations are embedded from `backend/migrations` at compile time and run
//! on a blocking thread over a synchronous connection, since the migration
//! harness is not async.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::define_port_error;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

define_port_error! {
    /// Errors raised while bringing the schema up to date.
    pub enum MigrationError {
        /// The migration connection could not be opened.
        Connection { message: String } => "migration connection failed: {message}",
        /// A migration failed to apply.
        Apply { message: String } => "migration failed: {message}",
    }
}

/// Apply every pending migration and return how many ran.
///
/// # Errors
///
/// Returns [`MigrationError`] if the database is unreachable or a migration
/// fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|err| MigrationError::connection(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| MigrationError::apply(err.to_string()))
    })
    .await
    .map_err(|err| MigrationError::apply(format!("migration task failed: {err}")))??;

    info!(applied, "schema migrations complete");
    Ok(applied)
}
