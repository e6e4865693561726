//! Driving port for intake mutations.

use async_trait::async_trait;

use crate::domain::{BottleSize, DailyIntakeRecord, Error, UserId};

/// Records consumed bottles against the current day.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeCommand: Send + Sync {
    /// Add one bottle of `size` to today's record and return the record.
    async fn record_bottle(
        &self,
        user_id: &UserId,
        size: BottleSize,
    ) -> Result<DailyIntakeRecord, Error>;
}
