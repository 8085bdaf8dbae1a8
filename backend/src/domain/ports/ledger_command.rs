//! Driving port for ledger mutations.
//!
//! Validation failures surface as
//! [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
//! with the submitted form echoed under `details.input`.

use async_trait::async_trait;

use crate::domain::{Error, Item, ItemId, ItemInput, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerCommand: Send + Sync {
    /// Validate and store a new entry for `owner`.
    async fn create_item(&self, owner: &UserId, input: &ItemInput) -> Result<ItemId, Error>;

    /// Replace the fields of `owner`'s entry `id`.
    async fn update_item(&self, owner: &UserId, id: ItemId, input: &ItemInput)
    -> Result<Item, Error>;

    /// Remove `owner`'s entry `id`.
    async fn delete_item(&self, owner: &UserId, id: ItemId) -> Result<(), Error>;
}
