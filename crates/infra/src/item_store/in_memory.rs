//! In-memory item store for dev and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use carestock_core::ItemId;
use carestock_inventory::{Item, ItemPatch, NewItem};

use super::{ItemStore, StoreError};

/// In-memory store. Same observable semantics as the Postgres store,
/// minus durability.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<HashMap<ItemId, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<ItemId, Item>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<ItemId, Item>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let map = self.read()?;
        let mut items: Vec<Item> = map.values().cloned().collect();
        // `updated_at` descending; id breaks ties deterministically.
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn create(&self, draft: NewItem) -> Result<Item, StoreError> {
        let item = Item::create(ItemId::new(), draft, Utc::now())?;
        self.write()?.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: &ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        let mut map = self.write()?;
        let Some(existing) = map.get(id) else {
            return Ok(None);
        };
        let updated = existing.apply(&patch, Utc::now())?;
        map.insert(updated.id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, StoreError> {
        Ok(self.write()?.remove(id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut map = self.write()?;
        let count = map.len() as u64;
        map.clear();
        Ok(count)
    }
}
