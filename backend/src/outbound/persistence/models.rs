//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{items, users};

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row read from the items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i64,
    pub user_id: Uuid,
    pub amount: i64,
    pub kind: String,
    pub event: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new entries; `id` comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub user_id: Uuid,
    pub amount: i64,
    pub kind: &'a str,
    pub event: &'a str,
    pub memo: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

/// Changeset for the mutable entry columns.
///
/// `memo` is always written so clearing it stores NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ItemUpdate<'a> {
    pub amount: i64,
    pub kind: &'a str,
    pub event: &'a str,
    pub memo: Option<&'a str>,
}
