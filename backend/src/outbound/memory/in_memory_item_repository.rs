//! `ItemRepository` backed by a mutex-guarded vector.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemFields, ItemFilter, ItemId, NewItem, UserId};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    items: Vec<Item>,
}

/// Ids are assigned from 1 upwards and never reused.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    store: Mutex<Store>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, ItemRepositoryError> {
        self.store
            .lock()
            .map_err(|_| ItemRepositoryError::query("item store lock poisoned"))
    }
}

fn is_owned(item: &Item, id: ItemId, owner: &UserId) -> bool {
    item.id() == id && item.owner() == owner
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_for_owner(
        &self,
        owner: &UserId,
        filter: &ItemFilter,
    ) -> Result<Vec<Item>, ItemRepositoryError> {
        let store = self.lock()?;
        let mut found: Vec<Item> = store
            .items
            .iter()
            .filter(|item| item.owner() == owner && filter.matches(item))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(found)
    }

    async fn find_owned(
        &self,
        id: ItemId,
        owner: &UserId,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .items
            .iter()
            .find(|item| is_owned(item, id, owner))
            .cloned())
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, ItemRepositoryError> {
        let mut store = self.lock()?;
        store.next_id = store
            .next_id
            .checked_add(1)
            .ok_or_else(|| ItemRepositoryError::query("item id sequence exhausted"))?;
        let stored = Item::new(
            ItemId::new(store.next_id),
            item.owner.clone(),
            item.fields.clone(),
            item.created_at,
        );
        store.items.push(stored.clone());
        Ok(stored)
    }

    async fn update_owned(
        &self,
        id: ItemId,
        owner: &UserId,
        fields: &ItemFields,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let mut store = self.lock()?;
        let Some(slot) = store
            .items
            .iter_mut()
            .find(|item| is_owned(item, id, owner))
        else {
            return Ok(None);
        };
        let updated = slot.clone().with_fields(fields.clone());
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_owned(&self, id: ItemId, owner: &UserId) -> Result<bool, ItemRepositoryError> {
        let mut store = self.lock()?;
        let before = store.items.len();
        store.items.retain(|item| !is_owned(item, id, owner));
        Ok(store.items.len() < before)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{FilterInput, ItemInput};
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn new_item(owner: &UserId, amount: &str, kind: &str, created_at: DateTime<Utc>) -> NewItem {
        NewItem {
            owner: owner.clone(),
            fields: ItemFields::parse(&ItemInput {
                amount: amount.into(),
                kind: kind.into(),
                event: "entry".into(),
                memo: None,
            })
            .expect("valid fields"),
            created_at,
        }
    }

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    #[rstest]
    #[tokio::test]
    async fn ids_increase_monotonically(owner: UserId) {
        let repo = InMemoryItemRepository::new();
        let first = repo
            .insert(&new_item(&owner, "1", "Income", at(1, 0)))
            .await
            .expect("insert");
        let second = repo
            .insert(&new_item(&owner, "2", "Income", at(1, 0)))
            .await
            .expect("insert");
        assert!(second.id() > first.id());
    }

    #[rstest]
    #[tokio::test]
    async fn listing_orders_newest_first_with_id_tiebreak(owner: UserId) {
        let repo = InMemoryItemRepository::new();
        for (amount, created_at) in [("1", at(1, 9)), ("2", at(2, 9)), ("3", at(2, 9))] {
            repo.insert(&new_item(&owner, amount, "Expense", created_at))
                .await
                .expect("insert");
        }

        let listed = repo
            .find_for_owner(&owner, &ItemFilter::default())
            .await
            .expect("list");
        let amounts: Vec<i64> = listed.iter().map(|item| item.amount().get()).collect();
        assert_eq!(amounts, vec![3, 2, 1]);
    }

    #[rstest]
    #[tokio::test]
    async fn listing_applies_owner_and_filter(owner: UserId) {
        let repo = InMemoryItemRepository::new();
        let other = UserId::random();
        repo.insert(&new_item(&owner, "500", "Expense", at(1, 12)))
            .await
            .expect("insert");
        repo.insert(&new_item(&owner, "2000", "Income", at(2, 12)))
            .await
            .expect("insert");
        repo.insert(&new_item(&other, "9999", "Income", at(2, 12)))
            .await
            .expect("insert");

        let filter = ItemFilter::parse(&FilterInput {
            kind: None,
            start_date: Some("2024-05-02".into()),
            end_date: None,
        })
        .expect("valid filter");
        let listed = repo.find_for_owner(&owner, &filter).await.expect("list");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|item| item.amount().get()), Some(2000));
    }

    #[rstest]
    #[tokio::test]
    async fn mutations_ignore_other_owners(owner: UserId) {
        let repo = InMemoryItemRepository::new();
        let intruder = UserId::random();
        let item = repo
            .insert(&new_item(&owner, "1000", "Income", at(1, 0)))
            .await
            .expect("insert");
        let fields = ItemFields::parse(&ItemInput {
            amount: "1".into(),
            kind: "Expense".into(),
            event: "hijack".into(),
            memo: None,
        })
        .expect("valid fields");

        assert_eq!(repo.find_owned(item.id(), &intruder).await.expect("find"), None);
        assert_eq!(
            repo.update_owned(item.id(), &intruder, &fields)
                .await
                .expect("update"),
            None
        );
        assert!(!repo.delete_owned(item.id(), &intruder).await.expect("delete"));
        assert_eq!(
            repo.find_owned(item.id(), &owner).await.expect("find"),
            Some(item.clone())
        );

        let updated = repo
            .update_owned(item.id(), &owner, &fields)
            .await
            .expect("update")
            .expect("owned item");
        assert_eq!(updated.event(), "hijack");
        assert_eq!(updated.created_at(), item.created_at());
        assert!(repo.delete_owned(item.id(), &owner).await.expect("delete"));
        assert_eq!(repo.find_owned(item.id(), &owner).await.expect("find"), None);
    }
}
