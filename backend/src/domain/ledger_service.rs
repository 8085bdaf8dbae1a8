//! Ledger domain service.
//!
//! Implements the [`LedgerQuery`] and [`LedgerCommand`] driving ports over an
//! [`ItemRepository`]. Every operation is scoped to the acting user; an entry
//! owned by another user is reported exactly like a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    ItemListing, ItemRepository, ItemRepositoryError, LedgerCommand, LedgerQuery,
};
use crate::domain::{
    Error, Item, ItemFields, ItemFilter, ItemId, ItemInput, ItemValidationError, LedgerSummary,
    Locale, Message, NewItem, UserId,
};

/// Ledger service implementing the driving ports.
#[derive(Clone)]
pub struct LedgerService<R> {
    items: Arc<R>,
    clock: Arc<dyn Clock>,
    locale: Locale,
}

impl<R> LedgerService<R> {
    /// Create a service over `items`, stamping new entries with `clock`.
    pub fn new(items: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            items,
            clock,
            locale: Locale::default(),
        }
    }

    /// Use `locale` for user-facing messages.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

impl<R> LedgerService<R>
where
    R: ItemRepository,
{
    fn map_repository_error(error: ItemRepositoryError) -> Error {
        match error {
            ItemRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("item repository unavailable: {message}"))
            }
            ItemRepositoryError::Query { message } => {
                Error::internal(format!("item repository error: {message}"))
            }
        }
    }

    fn not_found(&self) -> Error {
        let message = Message::ItemNotFound;
        Error::not_found(message.text(self.locale)).with_details(json!({ "code": message.code() }))
    }

    fn validation_error(&self, error: ItemValidationError, input: &ItemInput) -> Error {
        let message = error.message();
        Error::invalid_request(message.text(self.locale)).with_details(json!({
            "code": message.code(),
            "input": input,
        }))
    }

    async fn find_owned(&self, owner: &UserId, id: ItemId) -> Result<Item, Error> {
        self.items
            .find_owned(id, owner)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| self.not_found())
    }
}

#[async_trait]
impl<R> LedgerQuery for LedgerService<R>
where
    R: ItemRepository,
{
    async fn list_items(&self, owner: &UserId, filter: &ItemFilter) -> Result<ItemListing, Error> {
        let items = self
            .items
            .find_for_owner(owner, filter)
            .await
            .map_err(Self::map_repository_error)?;
        let summary = LedgerSummary::from_items(&items);
        debug!(user_id = %owner, count = items.len(), "listed ledger items");
        Ok(ItemListing {
            items,
            summary,
            filter: filter.echo(),
        })
    }

    async fn get_item(&self, owner: &UserId, id: ItemId) -> Result<Item, Error> {
        self.find_owned(owner, id).await
    }
}

#[async_trait]
impl<R> LedgerCommand for LedgerService<R>
where
    R: ItemRepository,
{
    async fn create_item(&self, owner: &UserId, input: &ItemInput) -> Result<ItemId, Error> {
        let fields = ItemFields::parse(input).map_err(|err| self.validation_error(err, input))?;
        let new_item = NewItem {
            owner: owner.clone(),
            fields,
            created_at: self.clock.utc(),
        };
        let item = self
            .items
            .insert(&new_item)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %owner, item_id = %item.id(), kind = %item.kind(), "ledger item created");
        Ok(item.id())
    }

    async fn update_item(
        &self,
        owner: &UserId,
        id: ItemId,
        input: &ItemInput,
    ) -> Result<Item, Error> {
        self.find_owned(owner, id).await?;
        let fields = ItemFields::parse(input).map_err(|err| self.validation_error(err, input))?;
        let item = self
            .items
            .update_owned(id, owner, &fields)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| self.not_found())?;
        info!(user_id = %owner, item_id = %id, "ledger item updated");
        Ok(item)
    }

    async fn delete_item(&self, owner: &UserId, id: ItemId) -> Result<(), Error> {
        let deleted = self
            .items
            .delete_owned(id, owner)
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(self.not_found());
        }
        info!(user_id = %owner, item_id = %id, "ledger item deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ledger_service_tests.rs"]
mod tests;
