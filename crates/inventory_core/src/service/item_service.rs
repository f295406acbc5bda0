//! Item use-case service.
//!
//! # Responsibility
//! - Validate input shape before anything reaches the store.
//! - Translate store absence into `ServiceError::NotFound`.
//! - Keep persistence faults distinct from domain outcomes.
//!
//! # Invariants
//! - The service holds no item state between calls.
//! - `search_items` never reports not-found; an empty list is a success.

use crate::model::item::{ensure_non_negative, Item, ItemDraft, ItemId, ItemValidationError};
use crate::repo::item_repo::{ItemRepository, RepoError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Page size used when a list request carries no `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for item use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input was malformed; the store was never called.
    Validation(ItemValidationError),
    /// Id does not resolve to an item.
    NotFound(ItemId),
    /// Storage unavailable or inconsistent.
    Persistence(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<ItemValidationError> for ServiceError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Persistence(other),
        }
    }
}

/// Unvalidated create/update payload.
///
/// Every field is optional so that a missing field surfaces as a
/// `Validation` error naming it, instead of a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<i64>,
}

impl From<ItemDraft> for ItemInput {
    fn from(draft: ItemDraft) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description),
            price: Some(draft.price),
            quantity: Some(draft.quantity),
        }
    }
}

impl TryFrom<ItemInput> for ItemDraft {
    type Error = ItemValidationError;

    fn try_from(input: ItemInput) -> Result<Self, Self::Error> {
        let name = input.name.ok_or(ItemValidationError::MissingField("name"))?;
        let description = input
            .description
            .ok_or(ItemValidationError::MissingField("description"))?;
        let price = input
            .price
            .ok_or(ItemValidationError::MissingField("price"))?;
        let quantity = input
            .quantity
            .ok_or(ItemValidationError::MissingField("quantity"))?;
        ItemDraft::new(name, description, price, quantity)
    }
}

/// Use-case service wrapper for item operations.
pub struct ItemService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new item; its id is `count + 1`.
    pub fn create_item(&self, input: ItemInput) -> ServiceResult<Item> {
        let draft = ItemDraft::try_from(input)?;
        Ok(self.repo.create(&draft)?)
    }

    /// Lists items by ascending id.
    ///
    /// # Contract
    /// - `skip` defaults to 0, `limit` to `DEFAULT_LIST_LIMIT`.
    /// - Negative bounds are validation errors.
    pub fn list_items(&self, skip: Option<i64>, limit: Option<i64>) -> ServiceResult<Vec<Item>> {
        let skip = non_negative_bound("skip", skip.unwrap_or(0))?;
        let limit = non_negative_bound("limit", limit.unwrap_or(DEFAULT_LIST_LIMIT))?;
        Ok(self.repo.list(skip, limit)?)
    }

    pub fn get_item(&self, id: ItemId) -> ServiceResult<Item> {
        self.repo.get(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Case-sensitive name substring search; blank matches everything.
    pub fn search_items(&self, name: &str) -> ServiceResult<Vec<Item>> {
        Ok(self.repo.search(name)?)
    }

    /// Replaces every non-id field of an existing item.
    ///
    /// Validation runs first, so a malformed payload for a missing id is a
    /// validation error, not not-found.
    pub fn update_item(&self, id: ItemId, input: ItemInput) -> ServiceResult<Item> {
        let draft = ItemDraft::try_from(input)?;
        self.repo
            .update(id, &draft)?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Deletes an item and returns it as it was before removal.
    ///
    /// Every item with a higher id moves down by one.
    pub fn delete_item(&self, id: ItemId) -> ServiceResult<Item> {
        self.repo.delete(id)?.ok_or(ServiceError::NotFound(id))
    }
}

fn non_negative_bound(field: &'static str, value: i64) -> Result<u64, ItemValidationError> {
    ensure_non_negative(field, value)?;
    u64::try_from(value).map_err(|_| ItemValidationError::NegativeValue { field, value })
}
