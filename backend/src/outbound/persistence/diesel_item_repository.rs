//! PostgreSQL-backed `ItemRepository` implementation using Diesel ORM.
//!
//! Owner scoping is part of every WHERE clause; lookups, updates, and deletes
//! each run as a single statement keyed on `(id, user_id)`.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Amount, Item, ItemFields, ItemFilter, ItemId, ItemType, NewItem, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ItemRow, ItemUpdate, NewItemRow};
use super::pool::DbPool;
use super::schema::items;

/// Diesel-backed implementation of the item repository port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: &diesel::result::Error) -> ItemRepositoryError {
    map_diesel_error(
        error,
        ItemRepositoryError::query,
        ItemRepositoryError::connection,
    )
}

fn pool_error(error: super::pool::PoolError) -> ItemRepositoryError {
    map_pool_error(error, ItemRepositoryError::connection)
}

fn row_to_item(row: ItemRow) -> Result<Item, ItemRepositoryError> {
    let ItemRow {
        id,
        user_id,
        amount,
        kind,
        event,
        memo,
        created_at,
    } = row;

    let amount = Amount::new(amount)
        .ok_or_else(|| ItemRepositoryError::query(format!("item {id} has amount {amount}")))?;
    let kind = kind
        .parse::<ItemType>()
        .map_err(|err| ItemRepositoryError::query(format!("item {id}: {err}")))?;

    Ok(Item::new(
        ItemId::new(id),
        UserId::from_uuid(user_id),
        ItemFields {
            amount,
            kind,
            event,
            memo,
        },
        created_at,
    ))
}

fn rows_to_items(rows: Vec<ItemRow>) -> Result<Vec<Item>, ItemRepositoryError> {
    rows.into_iter().map(row_to_item).collect()
}

/// Owner-scoped listing query with the filter's optional constraints.
fn listing_query<'a>(owner: &UserId, filter: &ItemFilter) -> items::BoxedQuery<'a, Pg> {
    let mut query = items::table
        .filter(items::user_id.eq(*owner.as_uuid()))
        .into_boxed();

    if let Some(kind) = filter.kind {
        query = query.filter(items::kind.eq(kind.as_str()));
    }
    if let Some(from) = filter.created_from() {
        query = query.filter(items::created_at.ge(from));
    }
    if let Some(until) = filter.created_until() {
        query = query.filter(items::created_at.le(until));
    }

    query.order((items::created_at.desc(), items::id.desc()))
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn find_for_owner(
        &self,
        owner: &UserId,
        filter: &ItemFilter,
    ) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ItemRow> = listing_query(owner, filter)
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;

        rows_to_items(rows)
    }

    async fn find_owned(
        &self,
        id: ItemId,
        owner: &UserId,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = items::table
            .filter(
                items::id
                    .eq(id.get())
                    .and(items::user_id.eq(*owner.as_uuid())),
            )
            .select(ItemRow::as_select())
            .first::<ItemRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?;

        row.map(row_to_item).transpose()
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewItemRow {
            user_id: *item.owner.as_uuid(),
            amount: item.fields.amount.get(),
            kind: item.fields.kind.as_str(),
            event: item.fields.event.as_str(),
            memo: item.fields.memo.as_deref(),
            created_at: item.created_at,
        };

        let row = diesel::insert_into(items::table)
            .values(&new_row)
            .returning(ItemRow::as_returning())
            .get_result::<ItemRow>(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;

        row_to_item(row)
    }

    async fn update_owned(
        &self,
        id: ItemId,
        owner: &UserId,
        fields: &ItemFields,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changes = ItemUpdate {
            amount: fields.amount.get(),
            kind: fields.kind.as_str(),
            event: fields.event.as_str(),
            memo: fields.memo.as_deref(),
        };

        let row = diesel::update(
            items::table.filter(
                items::id
                    .eq(id.get())
                    .and(items::user_id.eq(*owner.as_uuid())),
            ),
        )
        .set(&changes)
        .returning(ItemRow::as_returning())
        .get_result::<ItemRow>(&mut conn)
        .await
        .optional()
        .map_err(|err| diesel_error(&err))?;

        row.map(row_to_item).transpose()
    }

    async fn delete_owned(&self, id: ItemId, owner: &UserId) -> Result<bool, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = diesel::delete(
            items::table.filter(
                items::id
                    .eq(id.get())
                    .and(items::user_id.eq(*owner.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| diesel_error(&err))?;

        Ok(deleted > 0)
    }
}
