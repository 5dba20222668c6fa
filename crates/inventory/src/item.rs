use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carestock_core::{DomainError, DomainResult, FieldViolation, ItemId};

/// Maximum length of an item name, in characters.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum length of the optional notes field, in characters.
pub const NOTES_MAX_CHARS: usize = 500;
/// Upper bound on `value` for percentage items.
pub const PERCENTAGE_MAX: f64 = 100.0;

/// How an item's `value` is to be read: a count or a bounded ratio.
///
/// Wire values are `"qty"` / `"pct"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "qty")]
    Quantity,
    #[serde(rename = "pct")]
    Percentage,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Quantity => "qty",
            ItemType::Percentage => "pct",
        }
    }

    /// Parse a wire value. Anything but `"qty"` / `"pct"` is a field
    /// violation on `type`.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "qty" => Ok(ItemType::Quantity),
            "pct" => Ok(ItemType::Percentage),
            _ => Err(DomainError::validation(vec![FieldViolation::new(
                "type",
                "Type must be either qty or pct",
            )])),
        }
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating an item. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub item_type: ItemType,
    pub value: f64,
    pub notes: Option<String>,
}

/// A partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub item_type: Option<ItemType>,
    pub value: Option<f64>,
    pub notes: Option<String>,
}

/// Validate a whole record's worth of fields, reporting **all** violated
/// constraints (not just the first).
///
/// Runs before every write; a partial update validates the merged record, so
/// it can never produce an invalid stored state.
pub fn validate(
    name: &str,
    item_type: ItemType,
    value: f64,
    notes: Option<&str>,
) -> DomainResult<()> {
    let mut violations = Vec::new();

    let name = name.trim();
    if name.is_empty() {
        violations.push(FieldViolation::new("name", "Item name is required"));
    } else if name.chars().count() > NAME_MAX_CHARS {
        violations.push(FieldViolation::new(
            "name",
            "Item name cannot exceed 100 characters",
        ));
    }

    if !value.is_finite() {
        violations.push(FieldViolation::new("value", "Value must be a finite number"));
    } else if value < 0.0 {
        violations.push(FieldViolation::new("value", "Value cannot be negative"));
    } else if item_type == ItemType::Percentage && value > PERCENTAGE_MAX {
        violations.push(FieldViolation::new(
            "value",
            "Percentage value cannot exceed 100",
        ));
    }

    if let Some(notes) = notes {
        if notes.trim().chars().count() > NOTES_MAX_CHARS {
            violations.push(FieldViolation::new(
                "notes",
                "Notes cannot exceed 500 characters",
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(violations))
    }
}

impl Item {
    /// Build a validated item from creation fields.
    ///
    /// The timestamp touch is explicit: both `created_at` and `updated_at`
    /// are set to `now` here, never by a storage-layer hook.
    pub fn create(id: ItemId, draft: NewItem, now: DateTime<Utc>) -> DomainResult<Item> {
        validate(&draft.name, draft.item_type, draft.value, draft.notes.as_deref())?;
        Ok(Item {
            id,
            name: draft.name.trim().to_string(),
            item_type: draft.item_type,
            value: draft.value,
            notes: normalize_notes(draft.notes),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a patch over this item and re-validate the result as a whole.
    ///
    /// Returns the merged item with `updated_at` refreshed to `now`. The
    /// original is untouched, so a rejected patch leaves the stored record
    /// exactly as it was.
    pub fn apply(&self, patch: &ItemPatch, now: DateTime<Utc>) -> DomainResult<Item> {
        let name = patch.name.as_deref().unwrap_or(&self.name);
        let item_type = patch.item_type.unwrap_or(self.item_type);
        let value = patch.value.unwrap_or(self.value);
        let notes = patch.notes.as_deref().or(self.notes.as_deref());

        validate(name, item_type, value, notes)?;

        Ok(Item {
            id: self.id,
            name: name.trim().to_string(),
            item_type,
            value,
            notes: normalize_notes(notes.map(str::to_string)),
            created_at: self.created_at,
            updated_at: now,
        })
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
