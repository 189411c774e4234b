//! Tag index use-case service.

use crate::model::item::ItemId;
use crate::model::tag::{Tag, TagId};
use crate::repo::tag_repo::TagRepository;
use crate::service::error::{report, CatalogResult};

/// Use-case service for the tag index.
pub struct TagService<R: TagRepository> {
    repo: R,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Attaches `label` to an existing item.
    ///
    /// # Errors
    /// - `NotFound` when the item does not exist.
    /// - `Conflict` when the item already carries the label; nothing is
    ///   written.
    pub fn add_tag(&self, item_id: ItemId, label: &str) -> CatalogResult<TagId> {
        self.repo
            .add_tag(item_id, label)
            .map_err(|err| report("tag_add", err))
    }

    pub fn tags_for_item(&self, item_id: ItemId) -> CatalogResult<Vec<Tag>> {
        self.repo
            .list_tags_for_item(item_id)
            .map_err(|err| report("tag_list", err))
    }

    pub fn list_tags(&self) -> CatalogResult<Vec<Tag>> {
        self.repo.list_tags().map_err(|err| report("tag_list", err))
    }
}
