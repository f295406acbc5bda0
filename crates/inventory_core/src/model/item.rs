//! Item domain model.
//!
//! # Responsibility
//! - Define the stored `Item` record and the `ItemDraft` write payload.
//! - Provide validation shared by write paths and read-back checks.
//!
//! # Invariants
//! - `price` and `quantity` are never negative.
//! - A stored item always has a positive `id`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Positional item identifier.
///
/// Kept as a type alias so signatures read as ids rather than counters.
/// Values are renumbered on delete, so callers must not cache them across
/// mutations made by someone else.
pub type ItemId = i64;

/// Validation failure for item payloads and query bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// A required field was absent from the input payload.
    MissingField(&'static str),
    /// A counted field (`price`, `quantity`, `skip`, `limit`) was below zero.
    NegativeValue { field: &'static str, value: i64 },
    /// Item ids start at 1.
    NonPositiveId(ItemId),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "field `{field}` is required"),
            Self::NegativeValue { field, value } => {
                write!(f, "field `{field}` must be a non-negative integer, got {value}")
            }
            Self::NonPositiveId(id) => write!(f, "item id must be positive, got {id}"),
        }
    }
}

impl Error for ItemValidationError {}

/// Write payload for create/update, prior to id assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub quantity: i64,
}

impl ItemDraft {
    /// Builds a draft and validates it in one step.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        quantity: i64,
    ) -> Result<Self, ItemValidationError> {
        let draft = Self {
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Checks counted fields are non-negative.
    ///
    /// Empty `name`/`description` are accepted.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        ensure_non_negative("price", self.price)?;
        ensure_non_negative("quantity", self.quantity)?;
        Ok(())
    }
}

/// Stored inventory record.
///
/// Serialized shape matches the HTTP `ItemResponse` body:
/// `{id, name, description, price, quantity}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub quantity: i64,
}

impl Item {
    /// Attaches an id to a draft.
    pub fn from_draft(id: ItemId, draft: ItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            quantity: draft.quantity,
        }
    }

    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id <= 0 {
            return Err(ItemValidationError::NonPositiveId(self.id));
        }
        ensure_non_negative("price", self.price)?;
        ensure_non_negative("quantity", self.quantity)?;
        Ok(())
    }
}

/// Rejects negative values for counted fields.
pub fn ensure_non_negative(field: &'static str, value: i64) -> Result<(), ItemValidationError> {
    if value < 0 {
        return Err(ItemValidationError::NegativeValue { field, value });
    }
    Ok(())
}
