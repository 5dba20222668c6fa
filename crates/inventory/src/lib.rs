//! Inventory domain module.
//!
//! This crate contains the business rules for inventory items, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;

pub use item::{Item, ItemPatch, ItemType, NewItem, validate};
