//! Driving port for intake reads.

use async_trait::async_trait;

use crate::domain::{DailyIntakeRecord, Error, HistoryEntry, UserId};

/// Read-side access to a user's ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeQuery: Send + Sync {
    /// Today's record; all-zero when nothing was logged yet.
    async fn today(&self, user_id: &UserId) -> Result<DailyIntakeRecord, Error>;

    /// Every logged day, newest first.
    async fn history(&self, user_id: &UserId) -> Result<Vec<HistoryEntry>, Error>;
}
