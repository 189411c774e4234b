//! Tag association model.
//!
//! # Invariants
//! - `(label, item_id)` is unique.
//! - `label` is stored normalized (see [`crate::model::text::normalize_label`]).

use crate::model::item::ItemId;
use serde::{Deserialize, Serialize};

/// Storage-assigned tag identity.
pub type TagId = i64;

/// Free-text label attached to exactly one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
    pub item_id: ItemId,
}
