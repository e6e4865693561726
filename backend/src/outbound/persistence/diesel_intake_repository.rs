//! PostgreSQL-backed `IntakeRepository` implementation using Diesel ORM.
//!
//! Increments are a single `INSERT … ON CONFLICT (user_id, day) DO UPDATE`
//! statement that adds the inserted delta to every counter column, so
//! concurrent increments of the same day never lose updates.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IntakeRepository, IntakeRepositoryError};
use crate::domain::{BottleSize, DailyIntakeRecord, HistoryEntry, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{DailyIntakeDelta, DailyIntakeRow};
use super::pool::{DbPool, PoolError};
use super::schema::daily_intake;

/// Diesel-backed intake ledger.
#[derive(Clone)]
pub struct DieselIntakeRepository {
    pool: DbPool,
}

impl DieselIntakeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IntakeRepositoryError {
    map_basic_pool_error(error, IntakeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IntakeRepositoryError {
    map_basic_diesel_error(
        error,
        IntakeRepositoryError::query,
        IntakeRepositoryError::connection,
    )
}

fn row_to_record(row: DailyIntakeRow) -> Result<DailyIntakeRecord, IntakeRepositoryError> {
    row.into_record()
        .map_err(|err| IntakeRepositoryError::query(err.to_string()))
}

#[async_trait]
impl IntakeRepository for DieselIntakeRepository {
    async fn increment(
        &self,
        user_id: &UserId,
        day: NaiveDate,
        size: BottleSize,
    ) -> Result<DailyIntakeRecord, IntakeRepositoryError> {
        use daily_intake::dsl::{
            count_330ml, count_500ml, count_750ml, count_1000ml, count_1500ml,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let delta = DailyIntakeDelta::one_bottle(user_id, day, size);

        let row = diesel::insert_into(daily_intake::table)
            .values(&delta)
            .on_conflict((daily_intake::user_id, daily_intake::day))
            .do_update()
            .set((
                count_330ml.eq(count_330ml + excluded(count_330ml)),
                count_500ml.eq(count_500ml + excluded(count_500ml)),
                count_750ml.eq(count_750ml + excluded(count_750ml)),
                count_1000ml.eq(count_1000ml + excluded(count_1000ml)),
                count_1500ml.eq(count_1500ml + excluded(count_1500ml)),
            ))
            .returning(DailyIntakeRow::as_returning())
            .get_result::<DailyIntakeRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_record(row)
    }

    async fn find_for_day(
        &self,
        user_id: &UserId,
        day: NaiveDate,
    ) -> Result<Option<DailyIntakeRecord>, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = daily_intake::table
            .filter(daily_intake::user_id.eq(user_id.as_uuid()))
            .filter(daily_intake::day.eq(day))
            .select(DailyIntakeRow::as_select())
            .first::<DailyIntakeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<HistoryEntry>, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DailyIntakeRow> = daily_intake::table
            .filter(daily_intake::user_id.eq(user_id.as_uuid()))
            .order(daily_intake::day.desc())
            .select(DailyIntakeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_record(row).map(|record| HistoryEntry::from(&record)))
            .collect()
    }
}
