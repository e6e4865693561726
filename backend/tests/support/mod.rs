//! Shared helpers for aqua integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module is pulled in with `mod support;` where needed.
//!
//! PostgreSQL-backed tests get a fresh database from the shared embedded
//! cluster (`pg-embed-setup-unpriv`). Setting `AQUA_TEST_DATABASE_URL` points
//! them at an existing server instead.

mod cluster_skip;

use std::sync::{Mutex, PoisonError};

use aqua::outbound::persistence::{DbPool, PoolConfig, ensure_schema};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use tokio::runtime::Runtime;

use cluster_skip::handle_cluster_setup_failure;

/// Environment variable naming an externally managed PostgreSQL database.
pub const TEST_DATABASE_URL_ENV: &str = "AQUA_TEST_DATABASE_URL";

/// Serialises schema bootstrap on a shared external database; concurrent
/// `CREATE TABLE IF NOT EXISTS` can still collide on the catalog.
static BOOTSTRAP: Mutex<()> = Mutex::new(());

/// Where a test's database lives. The embedded variant drops the database
/// when the context goes away.
enum TestDatabase {
    External(String),
    Embedded(TemporaryDatabase),
}

impl TestDatabase {
    fn provision() -> Result<Self, String> {
        if let Some(url) = std::env::var(TEST_DATABASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
        {
            return Ok(Self::External(url));
        }
        let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
        let database = cluster
            .temporary_database(format!("aqua_{}", uuid::Uuid::new_v4().simple()))
            .map_err(|err| format!("create temporary database: {err:?}"))?;
        Ok(Self::Embedded(database))
    }

    fn url(&self) -> &str {
        match self {
            Self::External(url) => url,
            Self::Embedded(database) => database.url(),
        }
    }
}

/// Runtime plus a pool over a database with the aqua tables in place.
///
/// Fields drop in order: the pool closes its connections before the
/// runtime stops and the temporary database is removed.
pub struct PgContext {
    pub pool: DbPool,
    pub runtime: Runtime,
    _database: TestDatabase,
}

fn setup_context() -> Result<PgContext, String> {
    let database = TestDatabase::provision()?;
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let config = PoolConfig::new(database.url()).with_max_size(4);
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    let guard = BOOTSTRAP.lock().unwrap_or_else(PoisonError::into_inner);
    let bootstrap = runtime.block_on(ensure_schema(&pool));
    drop(guard);
    bootstrap.map_err(|err| format!("schema bootstrap: {err}"))?;

    Ok(PgContext {
        pool,
        runtime,
        _database: database,
    })
}

/// Database context for a test, or `None` when provisioning failed and
/// `SKIP_TEST_CLUSTER` allows skipping. Panics otherwise.
pub fn pg_context() -> Option<PgContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

/// Username that will not collide with other test runs sharing a database.
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
