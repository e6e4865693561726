//! Tests for the intake service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::IntakeCounts;
use crate::domain::ports::MockIntakeRepository;
use crate::test_support::MutableClock;

fn local_instant(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(2026, 10, day, hour, minute, 0)
        .earliest()
        .expect("valid local timestamp")
        .with_timezone(&Utc)
}

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(local_instant(17, 8, 30)))
}

fn fixture_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
}

#[rstest]
#[tokio::test]
async fn record_bottle_increments_todays_record(clock: Arc<MutableClock>) {
    let user_id = UserId::random();

    let mut repo = MockIntakeRepository::new();
    repo.expect_increment()
        .withf(move |id, day, size| {
            *id == user_id && *day == fixture_day() && *size == BottleSize::Ml500
        })
        .times(1)
        .return_once(move |id, day, size| {
            Ok(DailyIntakeRecord::new(*id, day, IntakeCounts::single(size)))
        });

    let service = IntakeService::new(Arc::new(repo), clock);
    let record = service
        .record_bottle(&user_id, BottleSize::Ml500)
        .await
        .expect("increment succeeds");

    assert_eq!(record.day(), fixture_day());
    assert_eq!(record.counts().get(BottleSize::Ml500), 1);
}

#[rstest]
#[tokio::test]
async fn today_without_increments_is_all_zero(clock: Arc<MutableClock>) {
    let user_id = UserId::random();

    let mut repo = MockIntakeRepository::new();
    repo.expect_find_for_day().return_once(|_, _| Ok(None));

    let service = IntakeService::new(Arc::new(repo), clock);
    let record = service
        .today(&user_id)
        .await
        .expect("read succeeds");

    assert_eq!(record, DailyIntakeRecord::empty(user_id, fixture_day()));
    assert_eq!(record.total_litres(), 0.0);
}

#[rstest]
#[tokio::test]
async fn history_passes_repository_order_through(clock: Arc<MutableClock>) {
    let newer = HistoryEntry::new(fixture_day(), 1500);
    let older = HistoryEntry::new(
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"),
        330,
    );
    let expected = vec![newer, older];
    let returned = expected.clone();

    let mut repo = MockIntakeRepository::new();
    repo.expect_history().return_once(move |_| Ok(returned));

    let service = IntakeService::new(Arc::new(repo), clock);
    let history = service
        .history(&UserId::random())
        .await
        .expect("history succeeds");

    assert_eq!(history, expected);
}

#[rstest]
#[case(IntakeRepositoryError::connection("refused"))]
#[case(IntakeRepositoryError::query("deadlock"))]
#[tokio::test]
async fn repository_failures_are_internal(
    clock: Arc<MutableClock>,
    #[case] failure: IntakeRepositoryError,
) {
    let mut repo = MockIntakeRepository::new();
    repo.expect_increment()
        .return_once(move |_, _, _| Err(failure));

    let service = IntakeService::new(Arc::new(repo), clock);
    let error = service
        .record_bottle(&UserId::random(), BottleSize::Ml330)
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn today_follows_the_clock_past_local_midnight(clock: Arc<MutableClock>) {
    let user_id = UserId::random();
    let next_day = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");

    let mut repo = MockIntakeRepository::new();
    repo.expect_increment()
        .withf(|_, day, _| *day == fixture_day())
        .times(1)
        .returning(|id, day, size| Ok(DailyIntakeRecord::new(*id, day, IntakeCounts::single(size))));
    repo.expect_increment()
        .withf(move |_, day, _| *day == next_day)
        .times(1)
        .returning(|id, day, size| Ok(DailyIntakeRecord::new(*id, day, IntakeCounts::single(size))));

    let service = IntakeService::new(Arc::new(repo), Arc::clone(&clock) as Arc<dyn Clock>);
    let before = service
        .record_bottle(&user_id, BottleSize::Ml750)
        .await
        .expect("first increment succeeds");
    clock.set(local_instant(18, 0, 5));
    let after = service
        .record_bottle(&user_id, BottleSize::Ml750)
        .await
        .expect("second increment succeeds");

    assert_eq!(before.day(), fixture_day());
    assert_eq!(after.day(), next_day);
}
