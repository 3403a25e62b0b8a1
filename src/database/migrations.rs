use crate::database::CURRENT_SCHEMA;
use crate::error::AppError;
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

/// Brings the database up to `CURRENT_SCHEMA`. The schema is a single
/// `CREATE TABLE IF NOT EXISTS`, so this is atomic and a no-op against an
/// already migrated store.
#[instrument(skip(pool))]
pub async fn create_table(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    info!("Ensuring students schema exists");

    sqlx::query(CURRENT_SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to apply schema: {}", e)))?;

    info!("Schema is up to date");
    Ok(())
}
