//! Port for the per-day intake ledger.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{BottleSize, DailyIntakeRecord, HistoryEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by intake repository adapters.
    pub enum IntakeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "intake repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "intake repository query failed: {message}",
    }
}

/// Per-user, per-day bottle counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    /// Add one bottle of `size` to the record for (`user_id`, `day`),
    /// creating the record on first use. Concurrent calls must not lose
    /// updates.
    async fn increment(
        &self,
        user_id: &UserId,
        day: NaiveDate,
        size: BottleSize,
    ) -> Result<DailyIntakeRecord, IntakeRepositoryError>;

    /// Fetch the record for (`user_id`, `day`), if any increment happened.
    async fn find_for_day(
        &self,
        user_id: &UserId,
        day: NaiveDate,
    ) -> Result<Option<DailyIntakeRecord>, IntakeRepositoryError>;

    /// Day totals for `user_id`, newest first.
    async fn history(&self, user_id: &UserId)
    -> Result<Vec<HistoryEntry>, IntakeRepositoryError>;
}
