//! Item persistence: the storage trait and its implementations.

use async_trait::async_trait;
use thiserror::Error;

use carestock_core::{DomainError, ItemId};
use carestock_inventory::{Item, ItemPatch, NewItem};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryItemStore;
pub use postgres::PostgresItemStore;

/// Storage-layer failure.
///
/// Not-found is **not** an error here: lookups return `Ok(None)` and bulk
/// entries come back as [`BulkOutcome::Skipped`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A deterministic domain failure (validation), user-correctable.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage unreachable or an internal query fault. Fatal to the request,
    /// not to the process.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Per-entry outcome of a bulk update.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOutcome {
    Updated(Item),
    Skipped { id: ItemId, reason: SkipReason },
}

/// Why a bulk entry was skipped instead of updated.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NotFound,
    Invalid(DomainError),
}

/// Durable persistence of the item collection, with validation at the write
/// boundary.
///
/// Held by the HTTP layer as `Arc<dyn ItemStore>` — constructed explicitly
/// and passed in, never an ambient global.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items, ordered by `updated_at` descending.
    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError>;

    /// Validate, assign a fresh id, set both timestamps to now, persist.
    async fn create(&self, draft: NewItem) -> Result<Item, StoreError>;

    /// Merge the patch over the existing record, re-validate the merged
    /// record as a whole, refresh `updated_at`.
    ///
    /// `Ok(None)` means no record for `id`; an update never creates one.
    async fn update(&self, id: &ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError>;

    /// Apply each update independently. A missing id or a rejected patch
    /// skips that entry and never aborts the rest; only storage
    /// unavailability fails the whole batch.
    ///
    /// Outcomes come back in input order.
    async fn update_many(
        &self,
        updates: Vec<(ItemId, ItemPatch)>,
    ) -> Result<Vec<BulkOutcome>, StoreError> {
        let mut outcomes = Vec::with_capacity(updates.len());
        for (id, patch) in updates {
            outcomes.push(apply_one(self, &id, patch).await?);
        }
        Ok(outcomes)
    }

    /// Returns whether a record existed for `id`.
    async fn delete(&self, id: &ItemId) -> Result<bool, StoreError>;

    /// Clear the collection, returning the number of records removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}

/// One bulk entry in terms of [`ItemStore::update`], folding domain failures
/// into a skip.
pub(crate) async fn apply_one<S: ItemStore + ?Sized>(
    store: &S,
    id: &ItemId,
    patch: ItemPatch,
) -> Result<BulkOutcome, StoreError> {
    match store.update(id, patch).await {
        Ok(Some(item)) => Ok(BulkOutcome::Updated(item)),
        Ok(None) => Ok(BulkOutcome::Skipped {
            id: *id,
            reason: SkipReason::NotFound,
        }),
        Err(StoreError::Domain(err)) => Ok(BulkOutcome::Skipped {
            id: *id,
            reason: SkipReason::Invalid(err),
        }),
        Err(err) => Err(err),
    }
}
