//! Per-day intake records and their derived totals.
//!
//! Counts are the only stored quantity; volumes are always recomputed from
//! [`BottleSize::millilitres`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BottleSize, UserId};

/// Bottle counts for one day, one slot per [`BottleSize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeCounts([u32; BottleSize::COUNT]);

impl IntakeCounts {
    /// All-zero counts.
    pub const fn zero() -> Self {
        Self([0; BottleSize::COUNT])
    }

    /// Build counts from per-size values ordered as [`BottleSize::ALL`].
    pub const fn from_array(counts: [u32; BottleSize::COUNT]) -> Self {
        Self(counts)
    }

    /// Counts with a single bottle of `size`.
    pub fn single(size: BottleSize) -> Self {
        let mut counts = Self::zero();
        counts.increment(size);
        counts
    }

    /// Count for `size`.
    pub fn get(&self, size: BottleSize) -> u32 {
        self.0[size.index()]
    }

    /// Add one bottle of `size`, saturating at `u32::MAX`.
    pub fn increment(&mut self, size: BottleSize) {
        let slot = &mut self.0[size.index()];
        *slot = slot.saturating_add(1);
    }

    /// Per-size counts in [`BottleSize::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (BottleSize, u32)> + '_ {
        BottleSize::ALL
            .into_iter()
            .map(move |size| (size, self.get(size)))
    }

    /// Σ count × volume, in millilitres.
    pub fn total_millilitres(&self) -> u64 {
        self.iter()
            .map(|(size, count)| u64::from(count) * u64::from(size.millilitres()))
            .sum()
    }

    /// Total volume in litres.
    ///
    /// # Examples
    /// ```
    /// use aqua::domain::{BottleSize, IntakeCounts};
    ///
    /// let mut counts = IntakeCounts::zero();
    /// counts.increment(BottleSize::Ml500);
    /// counts.increment(BottleSize::Ml1000);
    /// assert_eq!(counts.litres(), 1.5);
    /// ```
    pub fn litres(&self) -> f64 {
        millilitres_to_litres(self.total_millilitres())
    }
}

fn millilitres_to_litres(millilitres: u64) -> f64 {
    // Totals stay far below 2^53 ml, where f64 is exact.
    millilitres as f64 / 1000.0
}

/// Intake for one user on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyIntakeRecord {
    user_id: UserId,
    day: NaiveDate,
    counts: IntakeCounts,
}

impl DailyIntakeRecord {
    pub fn new(user_id: UserId, day: NaiveDate, counts: IntakeCounts) -> Self {
        Self {
            user_id,
            day,
            counts,
        }
    }

    /// Record for a day with no increments yet.
    pub fn empty(user_id: UserId, day: NaiveDate) -> Self {
        Self::new(user_id, day, IntakeCounts::zero())
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn counts(&self) -> &IntakeCounts {
        &self.counts
    }

    pub fn total_litres(&self) -> f64 {
        self.counts.litres()
    }
}

/// One row of a user's history, newest first when listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    day: NaiveDate,
    total_millilitres: u64,
}

impl HistoryEntry {
    pub fn new(day: NaiveDate, total_millilitres: u64) -> Self {
        Self {
            day,
            total_millilitres,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn total_millilitres(&self) -> u64 {
        self.total_millilitres
    }

    pub fn total_litres(&self) -> f64 {
        millilitres_to_litres(self.total_millilitres)
    }
}

impl From<&DailyIntakeRecord> for HistoryEntry {
    fn from(record: &DailyIntakeRecord) -> Self {
        Self::new(record.day(), record.counts().total_millilitres())
    }
}

/// Serialised count for one bottle size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BottleCountView {
    #[schema(value_type = String, example = "500ml")]
    pub size: BottleSize,
    #[schema(example = 500)]
    pub millilitres: u32,
    #[schema(example = 3)]
    pub count: u32,
}

/// Serialised day view returned by `/` and `/increment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyIntakeView {
    #[schema(value_type = String, format = Date, example = "2026-10-17")]
    pub date: NaiveDate,
    pub counts: Vec<BottleCountView>,
    #[schema(example = 1.5)]
    pub total_litres: f64,
}

impl From<&DailyIntakeRecord> for DailyIntakeView {
    fn from(record: &DailyIntakeRecord) -> Self {
        Self {
            date: record.day(),
            counts: record
                .counts()
                .iter()
                .map(|(size, count)| BottleCountView {
                    size,
                    millilitres: size.millilitres(),
                    count,
                })
                .collect(),
            total_litres: record.total_litres(),
        }
    }
}

/// Serialised history row returned by `/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryView {
    #[schema(value_type = String, format = Date, example = "2026-10-17")]
    pub date: NaiveDate,
    #[schema(example = 1.5)]
    pub total_litres: f64,
}

impl From<&HistoryEntry> for HistoryEntryView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            date: entry.day(),
            total_litres: entry.total_litres(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
    }

    #[rstest]
    fn zero_counts_total_nothing() {
        let counts = IntakeCounts::zero();
        assert!(counts.iter().all(|(_, count)| count == 0));
        assert_eq!(counts.total_millilitres(), 0);
        assert_eq!(counts.litres(), 0.0);
    }

    #[rstest]
    #[case(BottleSize::Ml330, 4, 1.32)]
    #[case(BottleSize::Ml500, 3, 1.5)]
    #[case(BottleSize::Ml750, 2, 1.5)]
    #[case(BottleSize::Ml1000, 1, 1.0)]
    #[case(BottleSize::Ml1500, 5, 7.5)]
    fn repeated_increments_touch_only_one_slot(
        #[case] size: BottleSize,
        #[case] times: u32,
        #[case] litres: f64,
    ) {
        let mut counts = IntakeCounts::zero();
        for _ in 0..times {
            counts.increment(size);
        }

        for (other, count) in counts.iter() {
            let expected = if other == size { times } else { 0 };
            assert_eq!(count, expected, "slot {other}");
        }
        assert_eq!(
            counts.total_millilitres(),
            u64::from(times) * u64::from(size.millilitres())
        );
        assert!((counts.litres() - litres).abs() < f64::EPSILON);
    }

    #[rstest]
    fn mixed_counts_sum_all_sizes() {
        let counts = IntakeCounts::from_array([1, 1, 1, 1, 1]);
        assert_eq!(counts.total_millilitres(), 330 + 500 + 750 + 1000 + 1500);
        assert!((counts.litres() - 4.08).abs() < f64::EPSILON);
    }

    #[rstest]
    fn increment_saturates() {
        let mut counts = IntakeCounts::from_array([u32::MAX, 0, 0, 0, 0]);
        counts.increment(BottleSize::Ml330);
        assert_eq!(counts.get(BottleSize::Ml330), u32::MAX);
    }

    #[rstest]
    fn day_view_lists_every_size(day: NaiveDate) {
        let record = DailyIntakeRecord::new(
            UserId::random(),
            day,
            IntakeCounts::single(BottleSize::Ml750),
        );
        let view = DailyIntakeView::from(&record);
        let value = serde_json::to_value(&view).expect("serialise view");

        assert_eq!(value["date"], "2026-10-17");
        assert_eq!(value["totalLitres"], 0.75);
        let counts = value["counts"].as_array().expect("counts array");
        assert_eq!(counts.len(), BottleSize::COUNT);
        assert_eq!(counts[2]["size"], "750ml");
        assert_eq!(counts[2]["count"], 1);
        assert_eq!(counts[0]["count"], 0);
    }

    #[rstest]
    fn history_entry_from_record(day: NaiveDate) {
        let record = DailyIntakeRecord::new(
            UserId::random(),
            day,
            IntakeCounts::from_array([0, 3, 0, 0, 0]),
        );
        let entry = HistoryEntry::from(&record);
        assert_eq!(entry.day(), day);
        assert_eq!(entry.total_millilitres(), 1500);
        assert_eq!(HistoryEntryView::from(&entry).total_litres, 1.5);
    }
}
