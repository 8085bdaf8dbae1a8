//! Driving port for ledger reads.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, FilterEcho, Item, ItemFilter, ItemId, LedgerSummary, UserId};

/// Filtered entries with totals computed over exactly those entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListing {
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub summary: LedgerSummary,
    #[serde(flatten)]
    pub filter: FilterEcho,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// List `owner`'s entries matching `filter` together with their totals.
    async fn list_items(&self, owner: &UserId, filter: &ItemFilter) -> Result<ItemListing, Error>;

    /// Fetch one entry; entries of other users are reported as not found.
    async fn get_item(&self, owner: &UserId, id: ItemId) -> Result<Item, Error>;
}
