//! Intake ledger domain service.
//!
//! Resolves "today" through the injected clock (server local calendar day)
//! and delegates counting to the intake repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{IntakeCommand, IntakeQuery, IntakeRepository, IntakeRepositoryError};
use crate::domain::{BottleSize, DailyIntakeRecord, Error, HistoryEntry, UserId};

fn map_repository_error(error: IntakeRepositoryError) -> Error {
    match error {
        IntakeRepositoryError::Connection { message } => {
            error!(%message, "intake repository unavailable");
            Error::internal(format!("intake repository unavailable: {message}"))
        }
        IntakeRepositoryError::Query { message } => {
            error!(%message, "intake repository query failed");
            Error::internal(format!("intake repository error: {message}"))
        }
    }
}

/// Service implementing [`IntakeCommand`] and [`IntakeQuery`].
#[derive(Clone)]
pub struct IntakeService<R> {
    intake_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> IntakeService<R> {
    /// Create a service over the intake repository and a clock.
    pub fn new(intake_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { intake_repo, clock }
    }

    fn current_day(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }
}

#[async_trait]
impl<R> IntakeCommand for IntakeService<R>
where
    R: IntakeRepository,
{
    async fn record_bottle(
        &self,
        user_id: &UserId,
        size: BottleSize,
    ) -> Result<DailyIntakeRecord, Error> {
        let day = self.current_day();
        let record = self
            .intake_repo
            .increment(user_id, day, size)
            .await
            .map_err(map_repository_error)?;

        debug!(
            %user_id,
            %day,
            %size,
            count = record.counts().get(size),
            "bottle recorded"
        );
        Ok(record)
    }
}

#[async_trait]
impl<R> IntakeQuery for IntakeService<R>
where
    R: IntakeRepository,
{
    async fn today(&self, user_id: &UserId) -> Result<DailyIntakeRecord, Error> {
        let day = self.current_day();
        let record = self
            .intake_repo
            .find_for_day(user_id, day)
            .await
            .map_err(map_repository_error)?;
        Ok(record.unwrap_or_else(|| DailyIntakeRecord::empty(*user_id, day)))
    }

    async fn history(&self, user_id: &UserId) -> Result<Vec<HistoryEntry>, Error> {
        self.intake_repo
            .history(user_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "intake_service_tests.rs"]
mod tests;
