//! Port for ledger entry persistence.
//!
//! Every method except [`ItemRepository::insert`] takes the owning user and
//! must apply it in the same query as the id, so an entry owned by someone
//! else is indistinguishable from a missing one.

use async_trait::async_trait;

use crate::domain::{Item, ItemFields, ItemFilter, ItemId, NewItem, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Entries owned by `owner` matching `filter`, newest first with ties
    /// broken by descending id.
    async fn find_for_owner(
        &self,
        owner: &UserId,
        filter: &ItemFilter,
    ) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Entry `id` if it belongs to `owner`.
    async fn find_owned(
        &self,
        id: ItemId,
        owner: &UserId,
    ) -> Result<Option<Item>, ItemRepositoryError>;

    /// Persist a new entry and return it with its assigned id.
    async fn insert(&self, item: &NewItem) -> Result<Item, ItemRepositoryError>;

    /// Replace the mutable fields of entry `id` owned by `owner`.
    ///
    /// Returns `None` when no such entry exists.
    async fn update_owned(
        &self,
        id: ItemId,
        owner: &UserId,
        fields: &ItemFields,
    ) -> Result<Option<Item>, ItemRepositoryError>;

    /// Delete entry `id` owned by `owner`; `false` when nothing matched.
    async fn delete_owned(&self, id: ItemId, owner: &UserId) -> Result<bool, ItemRepositoryError>;
}
