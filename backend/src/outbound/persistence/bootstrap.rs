//! Startup schema creation.
//!
//! Tables are created idempotently with `CREATE TABLE IF NOT EXISTS`; there
//! is no migration history. The DDL must stay in step with [`super::schema`].

use diesel_async::SimpleAsyncConnection;
use tracing::info;

use super::pool::{DbPool, PoolError};

/// DDL for every table the adapters touch.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    username VARCHAR(64) NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS daily_intake (
    user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    day DATE NOT NULL,
    count_330ml INTEGER NOT NULL DEFAULT 0 CHECK (count_330ml >= 0),
    count_500ml INTEGER NOT NULL DEFAULT 0 CHECK (count_500ml >= 0),
    count_750ml INTEGER NOT NULL DEFAULT 0 CHECK (count_750ml >= 0),
    count_1000ml INTEGER NOT NULL DEFAULT 0 CHECK (count_1000ml >= 0),
    count_1500ml INTEGER NOT NULL DEFAULT 0 CHECK (count_1500ml >= 0),
    PRIMARY KEY (user_id, day)
);
";

/// Errors raised while creating the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBootstrapError {
    #[error("schema bootstrap could not connect: {0}")]
    Connection(#[from] PoolError),
    #[error("schema bootstrap statement failed: {message}")]
    Statement { message: String },
}

/// Create the tables if they do not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaBootstrapError> {
    let mut conn = pool.get().await?;
    conn.batch_execute(SCHEMA_SQL)
        .await
        .map_err(|err| SchemaBootstrapError::Statement {
            message: err.to_string(),
        })?;
    info!("database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::BottleSize;
    use rstest::rstest;

    #[rstest]
    fn ddl_is_idempotent() {
        let creates = SCHEMA_SQL.matches("CREATE TABLE").count();
        let guarded = SCHEMA_SQL.matches("CREATE TABLE IF NOT EXISTS").count();
        assert_eq!(creates, guarded);
    }

    #[rstest]
    fn ddl_has_a_column_per_bottle_size() {
        for size in BottleSize::ALL {
            let column = format!("count_{}", size.label());
            assert!(SCHEMA_SQL.contains(&column), "missing {column}");
        }
    }
}
