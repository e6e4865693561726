//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the credential store and intake ledger ports
//! backed by PostgreSQL via `diesel-async` and a `bb8` pool.
//!
//! - Adapters only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database failures surface as the ports' typed errors.
//!
//! # Example
//!
//! ```no_run
//! use aqua::outbound::persistence::{
//!     DbPool, DieselIntakeRepository, DieselUserRepository, PoolConfig, ensure_schema,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/aqua")).await?;
//! ensure_schema(&pool).await?;
//! let users = DieselUserRepository::new(pool.clone());
//! let intake = DieselIntakeRepository::new(pool);
//! # let _ = (users, intake);
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod diesel_basic_error_mapping;
mod diesel_intake_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use bootstrap::{SCHEMA_SQL, SchemaBootstrapError, ensure_schema};
pub use diesel_intake_repository::DieselIntakeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
