//! Infrastructure: durable persistence for the item collection.

pub mod item_store;
pub mod seed;

pub use item_store::{
    BulkOutcome, InMemoryItemStore, ItemStore, PostgresItemStore, SkipReason, StoreError,
};
