//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use hotel_core::error::{AppError, ErrorKind};
use hotel_core::result::AppResult;

/// Apply the embedded schema migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
        })?;

    info!("Database schema is up to date");
    Ok(())
}
