//! Catalog store use-case service.
//!
//! # Responsibility
//! - Provide add/list/search entry points over the item repository.
//! - Translate repository failures into [`CatalogError`].
//!
//! # Invariants
//! - Service layer remains storage-agnostic.
//! - Rating search is exact-match. Callers that prompt for a "minimum"
//!   rating still get only equal ratings back.

use crate::model::item::{Item, ItemId, NewItem};
use crate::repo::item_repo::ItemRepository;
use crate::service::error::{report, CatalogResult};

/// Use-case service for the catalog store.
pub struct CatalogService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one item and returns its identity.
    pub fn add_item(&self, item: &NewItem) -> CatalogResult<ItemId> {
        self.repo
            .create_item(item)
            .map_err(|err| report("item_add", err))
    }

    pub fn get_item(&self, id: ItemId) -> CatalogResult<Option<Item>> {
        self.repo.get_item(id).map_err(|err| report("item_get", err))
    }

    /// Lists all items in creation order.
    pub fn list_items(&self) -> CatalogResult<Vec<Item>> {
        self.repo.list_items().map_err(|err| report("item_list", err))
    }

    /// Lists items rated exactly `rating`, ordered by attribute.
    pub fn search_by_rating(&self, rating: i32) -> CatalogResult<Vec<Item>> {
        self.repo
            .search_by_rating(rating)
            .map_err(|err| report("item_search", err))
    }
}
