//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Count columns follow the
//! order of [`BottleSize::ALL`].

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{BottleSize, DailyIntakeRecord, IntakeCounts, UserId};

use super::schema::{daily_intake, users};

/// Row struct for reading credentials from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading daily intake counters.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = daily_intake)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DailyIntakeRow {
    pub user_id: Uuid,
    pub day: NaiveDate,
    pub count_330ml: i32,
    pub count_500ml: i32,
    pub count_750ml: i32,
    pub count_1000ml: i32,
    pub count_1500ml: i32,
}

/// Error raised when a stored counter is negative.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("negative bottle count {count} for {size} on {day}")]
pub(crate) struct NegativeCountError {
    pub size: BottleSize,
    pub day: NaiveDate,
    pub count: i32,
}

impl DailyIntakeRow {
    fn raw_counts(&self) -> [i32; BottleSize::COUNT] {
        [
            self.count_330ml,
            self.count_500ml,
            self.count_750ml,
            self.count_1000ml,
            self.count_1500ml,
        ]
    }

    /// Convert into a domain record, rejecting negative counters.
    pub fn into_record(self) -> Result<DailyIntakeRecord, NegativeCountError> {
        let mut counts = [0_u32; BottleSize::COUNT];
        for (slot, (size, raw)) in counts
            .iter_mut()
            .zip(BottleSize::ALL.into_iter().zip(self.raw_counts()))
        {
            *slot = u32::try_from(raw).map_err(|_| NegativeCountError {
                size,
                day: self.day,
                count: raw,
            })?;
        }
        Ok(DailyIntakeRecord::new(
            UserId::from_uuid(self.user_id),
            self.day,
            IntakeCounts::from_array(counts),
        ))
    }
}

/// Insertable row carrying the delta applied by one increment.
///
/// Inserted as-is for the first bottle of a day; on conflict every counter
/// column is added to the existing row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = daily_intake)]
pub(crate) struct DailyIntakeDelta {
    pub user_id: Uuid,
    pub day: NaiveDate,
    pub count_330ml: i32,
    pub count_500ml: i32,
    pub count_750ml: i32,
    pub count_1000ml: i32,
    pub count_1500ml: i32,
}

impl DailyIntakeDelta {
    /// Delta of one bottle of `size`.
    pub fn one_bottle(user_id: &UserId, day: NaiveDate, size: BottleSize) -> Self {
        let mut delta = [0_i32; BottleSize::COUNT];
        delta[size.index()] = 1;
        let [count_330ml, count_500ml, count_750ml, count_1000ml, count_1500ml] = delta;
        Self {
            user_id: *user_id.as_uuid(),
            day,
            count_330ml,
            count_500ml,
            count_750ml,
            count_1000ml,
            count_1500ml,
        }
    }
}
