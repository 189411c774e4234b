//! Tag index repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Attach free-text labels to existing catalog items.
//!
//! # Invariants
//! - Item existence and `(label, item)` uniqueness are checked inside the
//!   same immediate transaction as the insert.
//! - Labels are normalized before comparison and storage.
//! - A duplicate label is reported as [`Conflict::DuplicateTag`] and performs
//!   no write.

use crate::model::item::ItemId;
use crate::model::tag::{Tag, TagId};
use crate::model::text::normalize_label;
use crate::repo::error::{Conflict, Missing, RepoError, RepoResult};
use crate::repo::item_repo::item_exists;
use crate::repo::schema::{ensure_connection_ready, RequiredTable};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const REQUIRED_TABLES: &[RequiredTable] = &[
    ("items", &["id"]),
    ("item_tags", &["id", "label", "item_id"]),
];

/// Repository interface for the tag index.
pub trait TagRepository {
    /// Attaches `label` to the item and returns the new tag identity.
    fn add_tag(&self, item_id: ItemId, label: &str) -> RepoResult<TagId>;
    /// Lists tags of one item sorted by label.
    fn list_tags_for_item(&self, item_id: ItemId) -> RepoResult<Vec<Tag>>;
    /// Lists every tag in creation order.
    fn list_tags(&self) -> RepoResult<Vec<Tag>>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn add_tag(&self, item_id: ItemId, label: &str) -> RepoResult<TagId> {
        let label = normalize_label(label)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !item_exists(&tx, item_id)? {
            warn!("event=tag_add module=repo status=not_found item_id={item_id}");
            return Err(RepoError::NotFound(Missing::Item(item_id)));
        }

        let existing: Option<TagId> = tx
            .query_row(
                "SELECT id FROM item_tags WHERE item_id = ?1 AND label = ?2;",
                params![item_id, label.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(tag_id) = existing {
            info!(
                "event=tag_add module=repo status=conflict item_id={item_id} existing_tag_id={tag_id}"
            );
            return Err(RepoError::Conflict(Conflict::DuplicateTag { item_id, label }));
        }

        tx.execute(
            "INSERT INTO item_tags (label, item_id) VALUES (?1, ?2);",
            params![label.as_str(), item_id],
        )?;
        let tag_id = tx.last_insert_rowid();
        tx.commit()?;

        info!("event=tag_add module=repo status=ok item_id={item_id} tag_id={tag_id}");
        Ok(tag_id)
    }

    fn list_tags_for_item(&self, item_id: ItemId) -> RepoResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, label, item_id
             FROM item_tags
             WHERE item_id = ?1
             ORDER BY label ASC, id ASC;",
        )?;
        let mut rows = stmt.query([item_id])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }

    fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, label, item_id FROM item_tags ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }
}

fn parse_tag_row(row: &Row<'_>) -> RepoResult<Tag> {
    Ok(Tag {
        id: row.get("id")?,
        label: row.get("label")?,
        item_id: row.get("item_id")?,
    })
}
