//! Catalog item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist and query catalog items.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths normalize input via [`NewItem::normalized`] before SQL.
//! - Listing order is creation order (`id ASC`).
//! - Rating search is exact-match, ordered by `attribute ASC, id ASC`.

use crate::model::item::{Item, ItemId, NewItem};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::schema::{ensure_connection_ready, RequiredTable};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    year_published,
    rating,
    featured,
    attribute
FROM items";

const REQUIRED_TABLES: &[RequiredTable] = &[(
    "items",
    &[
        "id",
        "title",
        "author",
        "year_published",
        "rating",
        "featured",
        "attribute",
    ],
)];

/// Repository interface for the catalog store.
pub trait ItemRepository {
    /// Inserts one item and returns its new identity.
    fn create_item(&self, item: &NewItem) -> RepoResult<ItemId>;
    /// Gets one item by identity.
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    fn item_exists(&self, id: ItemId) -> RepoResult<bool>;
    /// Lists every item in creation order.
    fn list_items(&self) -> RepoResult<Vec<Item>>;
    /// Lists items whose rating equals `rating` exactly.
    fn search_by_rating(&self, rating: i32) -> RepoResult<Vec<Item>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &NewItem) -> RepoResult<ItemId> {
        let item = item.normalized()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO items (
                title,
                author,
                year_published,
                rating,
                featured,
                attribute
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                item.title.as_str(),
                item.author.as_str(),
                item.year,
                item.rating,
                item.featured.map(bool_to_int),
                item.attribute.as_deref(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!("event=item_add module=repo status=ok item_id={id}");
        Ok(id)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn item_exists(&self, id: ItemId) -> RepoResult<bool> {
        item_exists(self.conn, id)
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        debug!("event=item_list module=repo status=ok count={}", items.len());
        Ok(items)
    }

    fn search_by_rating(&self, rating: i32) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE rating = ?1
             ORDER BY attribute ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([rating])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        debug!(
            "event=item_search module=repo status=ok rating={rating} count={}",
            items.len()
        );
        Ok(items)
    }
}

/// Checks item existence on any connection or open transaction.
pub(crate) fn item_exists(conn: &Connection, id: ItemId) -> RepoResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM items WHERE id = ?1;", [id], |row| {
            row.get::<_, i64>(0)
        })
        .optional()?;
    Ok(found.is_some())
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let featured = match row.get::<_, Option<i64>>("featured")? {
        None => None,
        Some(0) => Some(false),
        Some(1) => Some(true),
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid featured value `{other}` in items.featured"
            )));
        }
    };

    Ok(Item {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year_published")?,
        rating: row.get("rating")?,
        featured,
        attribute: row.get("attribute")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
