//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login email, unique across accounts.
        email -> Varchar,
        /// Argon2 hash in PHC string format.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ledger entries. `amount > 0` and `kind IN ('Income', 'Expense')` are
    /// enforced by CHECK constraints.
    items (id) {
        /// Monotonic primary key (bigserial).
        id -> Int8,
        /// Owning account; rows cascade on account deletion.
        user_id -> Uuid,
        amount -> Int8,
        /// `Income` or `Expense`.
        kind -> Varchar,
        event -> Text,
        memo -> Nullable<Text>,
        /// Insert time, never updated.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(items -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(items, users);
