//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod intake_command;
mod intake_query;
mod intake_repository;
mod login_service;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use intake_command::MockIntakeCommand;
pub use intake_command::IntakeCommand;
#[cfg(test)]
pub use intake_query::MockIntakeQuery;
pub use intake_query::IntakeQuery;
#[cfg(test)]
pub use intake_repository::MockIntakeRepository;
pub use intake_repository::{IntakeRepository, IntakeRepositoryError};
#[cfg(test)]
pub use login_service::{MockLoginService, MockSignupService};
pub use login_service::{LoginService, SignupService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserPersistenceError, UserRepository};
