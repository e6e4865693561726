//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the DDL in [`super::bootstrap`] exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 64 characters).
        username -> Varchar,
        /// PHC-format Argon2id hash.
        password_hash -> Text,
    }
}

diesel::table! {
    /// Bottle counters per user and calendar day.
    daily_intake (user_id, day) {
        user_id -> Uuid,
        day -> Date,
        count_330ml -> Int4,
        count_500ml -> Int4,
        count_750ml -> Int4,
        count_1000ml -> Int4,
        count_1500ml -> Int4,
    }
}

diesel::joinable!(daily_intake -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, daily_intake);
