//! Test utilities for the aqua crate.
//!
//! In-memory port doubles and a wired HTTP harness shared by unit tests (in
//! `src/`) and integration tests (in `tests/`, via the `test-support`
//! feature).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_web::cookie::SameSite;
use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    IntakeRepository, IntakeRepositoryError, StoredCredentials, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AccountService, BottleSize, DailyIntakeRecord, HistoryEntry, IntakeCounts, IntakeService,
    SessionTokenCodec, SigningKey, TOKEN_LIFETIME_SECS, UserId, Username,
};
use crate::inbound::http::session::CookieSettings;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::security::{Argon2PasswordHasher, Argon2Settings};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clock whose current instant only moves when a test says so.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *lock(&self.0) += TimeDelta::seconds(seconds);
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *lock(&self.0) = now;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

/// Credential store keyed by username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, StoredCredentials>>,
}

impl InMemoryUserRepository {
    /// Stored hash for `username`, if the account exists.
    pub fn password_hash_for(&self, username: &str) -> Option<String> {
        lock(&self.users)
            .get(username)
            .map(|stored| stored.password_hash.clone())
    }

    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.users).is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<UserId, UserPersistenceError> {
        let mut users = lock(&self.users);
        if users.contains_key(username.as_str()) {
            return Err(UserPersistenceError::duplicate_username(username.as_str()));
        }
        let user_id = UserId::random();
        users.insert(
            username.as_str().to_owned(),
            StoredCredentials {
                user_id,
                password_hash: password_hash.to_owned(),
            },
        );
        Ok(user_id)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(lock(&self.users).get(username.as_str()).cloned())
    }
}

/// Intake ledger keyed by `(user, day)`. The mutex makes each increment
/// atomic, matching the single-statement upsert of the Postgres adapter.
#[derive(Default)]
pub struct InMemoryIntakeRepository {
    days: Mutex<HashMap<(UserId, NaiveDate), IntakeCounts>>,
}

impl InMemoryIntakeRepository {
    /// Seed counts for a day, replacing anything already stored.
    pub fn seed(&self, user_id: UserId, day: NaiveDate, counts: IntakeCounts) {
        lock(&self.days).insert((user_id, day), counts);
    }
}

#[async_trait]
impl IntakeRepository for InMemoryIntakeRepository {
    async fn increment(
        &self,
        user_id: &UserId,
        day: NaiveDate,
        size: BottleSize,
    ) -> Result<DailyIntakeRecord, IntakeRepositoryError> {
        let mut days = lock(&self.days);
        let counts = days.entry((*user_id, day)).or_default();
        counts.increment(size);
        Ok(DailyIntakeRecord::new(*user_id, day, *counts))
    }

    async fn find_for_day(
        &self,
        user_id: &UserId,
        day: NaiveDate,
    ) -> Result<Option<DailyIntakeRecord>, IntakeRepositoryError> {
        Ok(lock(&self.days)
            .get(&(*user_id, day))
            .map(|counts| DailyIntakeRecord::new(*user_id, day, *counts)))
    }

    async fn history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<HistoryEntry>, IntakeRepositoryError> {
        let mut entries: Vec<HistoryEntry> = lock(&self.days)
            .iter()
            .filter(|((owner, _), _)| owner == user_id)
            .map(|((_, day), counts)| HistoryEntry::new(*day, counts.total_millilitres()))
            .collect();
        entries.sort_by(|a, b| b.day().cmp(&a.day()));
        Ok(entries)
    }
}

/// Argon2id hasher with the smallest accepted work factor.
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    let settings = Argon2Settings {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    match Argon2PasswordHasher::new(settings) {
        Ok(hasher) => hasher,
        Err(error) => panic!("test argon2 parameters rejected: {error}"),
    }
}

/// Cookie attributes used by HTTP tests: plain HTTP, `SameSite=Lax`.
pub fn cookie_settings() -> CookieSettings {
    CookieSettings {
        secure: false,
        same_site: SameSite::Lax,
        max_age_secs: TOKEN_LIFETIME_SECS,
    }
}

/// 2026-10-17 12:00 UTC, the default harness instant.
pub fn default_instant() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0) {
        chrono::LocalResult::Single(instant) => instant,
        _ => panic!("fixed instant is valid"),
    }
}

/// Fully wired handler state over in-memory adapters.
pub struct TestHarness {
    users: Arc<InMemoryUserRepository>,
    intake: Arc<InMemoryIntakeRepository>,
    clock: Arc<MutableClock>,
    state: web::Data<HttpState>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::starting_at(default_instant())
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let intake = Arc::new(InMemoryIntakeRepository::default());
        let clock = Arc::new(MutableClock::new(now));

        let accounts = Arc::new(AccountService::new(
            users.clone(),
            Arc::new(fast_password_hasher()),
        ));
        let intake_service = Arc::new(IntakeService::new(intake.clone(), clock.clone()));
        let tokens = SessionTokenCodec::new(SigningKey::generate(), clock.clone());

        let state = HttpState::new(
            HttpStatePorts {
                login: accounts.clone(),
                signup: accounts,
                intake: intake_service.clone(),
                intake_query: intake_service,
            },
            tokens,
            cookie_settings(),
        );

        Self {
            users,
            intake,
            clock,
            state: web::Data::new(state),
        }
    }

    pub fn state(&self) -> web::Data<HttpState> {
        self.state.clone()
    }

    pub fn codec(&self) -> &SessionTokenCodec {
        &self.state.tokens
    }

    pub fn users(&self) -> &InMemoryUserRepository {
        &self.users
    }

    pub fn intake(&self) -> &InMemoryIntakeRepository {
        &self.intake
    }

    pub fn clock(&self) -> &MutableClock {
        &self.clock
    }

    /// Calendar day the intake service currently treats as today.
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
