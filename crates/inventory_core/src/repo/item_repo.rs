//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/list/search/create/update/delete over the `items` table.
//! - Own the dense-id invariant: ids are always exactly `1..=N`.
//!
//! # Invariants
//! - Absence is `Ok(None)`, never an error.
//! - `create` assigns `id = count + 1`.
//! - `delete` renumbers every survivor to `1..=N'` in prior id order, in the
//!   same transaction as the removal.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::item::{Item, ItemDraft, ItemId, ItemValidationError};
use log::debug;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    price,
    quantity
FROM items";

const REQUIRED_ITEM_COLUMNS: [&str; 5] = ["id", "name", "description", "price", "quantity"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item persistence and query operations.
///
/// Absence is not an error here; see [`ItemRepository`].
#[derive(Debug)]
pub enum RepoError {
    /// Draft rejected before any SQL ran.
    Validation(ItemValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be converted to a valid `Item`.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "item repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "item repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "item repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the item store.
///
/// Not-found is signalled by `None`; only storage faults and invalid rows
/// are errors.
pub trait ItemRepository {
    fn get(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Items ordered by id, skipping `skip` rows and returning at most `limit`.
    fn list(&self, skip: u64, limit: u64) -> RepoResult<Vec<Item>>;
    /// Case-sensitive substring match on `name`, ordered by id.
    fn search(&self, name_fragment: &str) -> RepoResult<Vec<Item>>;
    fn create(&self, draft: &ItemDraft) -> RepoResult<Item>;
    /// Overwrites every non-id field of an existing item.
    fn update(&self, id: ItemId, draft: &ItemDraft) -> RepoResult<Option<Item>>;
    /// Removes an item, renumbers survivors, returns the pre-delete snapshot.
    fn delete(&self, id: ItemId) -> RepoResult<Option<Item>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema is
    ///   not the one this binary writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_item_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn get(&self, id: ItemId) -> RepoResult<Option<Item>> {
        fetch_item(self.conn, id)
    }

    fn list(&self, skip: u64, limit: u64) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             ORDER BY id ASC
             LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![sql_bound(limit), sql_bound(skip)])?;
        collect_items(&mut rows)
    }

    fn search(&self, name_fragment: &str) -> RepoResult<Vec<Item>> {
        // instr() is case-sensitive and treats `%`/`_` literally, unlike LIKE.
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE ?1 = '' OR instr(name, ?1) > 0
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([name_fragment])?;
        collect_items(&mut rows)
    }

    fn create(&self, draft: &ItemDraft) -> RepoResult<Item> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id: ItemId = tx.query_row("SELECT COUNT(*) + 1 FROM items;", [], |row| row.get(0))?;
        tx.execute(
            "INSERT INTO items (
                id,
                name,
                description,
                price,
                quantity
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id,
                draft.name.as_str(),
                draft.description.as_str(),
                draft.price,
                draft.quantity,
            ],
        )?;
        tx.commit()?;

        Ok(Item::from_draft(id, draft.clone()))
    }

    fn update(&self, id: ItemId, draft: &ItemDraft) -> RepoResult<Option<Item>> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE items
             SET
                name = ?2,
                description = ?3,
                price = ?4,
                quantity = ?5
             WHERE id = ?1;",
            params![
                id,
                draft.name.as_str(),
                draft.description.as_str(),
                draft.price,
                draft.quantity,
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Item::from_draft(id, draft.clone())))
    }

    fn delete(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let Some(snapshot) = fetch_item(&tx, id)? else {
            return Ok(None);
        };

        tx.execute("DELETE FROM items WHERE id = ?1;", [id])?;
        let renumbered = renumber_items(&tx)?;
        tx.commit()?;

        debug!("event=item_renumber module=repo status=ok deleted_id={id} survivors={renumbered}");
        Ok(Some(snapshot))
    }
}

fn fetch_item(conn: &Connection, id: ItemId) -> RepoResult<Option<Item>> {
    let mut stmt = conn.prepare(&format!(
        "{ITEM_SELECT_SQL}
         WHERE id = ?1;"
    ))?;

    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_item_row(row)?));
    }

    Ok(None)
}

/// Reassigns ids `1..=N` to all rows in current id order.
///
/// Rows are first moved to negative ids so no intermediate assignment can
/// collide with a not-yet-moved primary key.
fn renumber_items(conn: &Connection) -> RepoResult<usize> {
    let ids = {
        let mut stmt = conn.prepare("SELECT id FROM items ORDER BY id ASC;")?;
        let rows = stmt.query_map([], |row| row.get::<_, ItemId>(0))?;
        rows.collect::<Result<Vec<_>, _>>()?
    };

    conn.execute("UPDATE items SET id = -id;", [])?;

    let mut stmt = conn.prepare("UPDATE items SET id = ?1 WHERE id = ?2;")?;
    for (new_id, old_id) in (1_i64..).zip(ids.iter()) {
        stmt.execute(params![new_id, -old_id])?;
    }

    Ok(ids.len())
}

fn collect_items(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Item>> {
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row)?);
    }
    Ok(items)
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let item = Item {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        price: row.get("price")?,
        quantity: row.get("quantity")?,
    };
    item.validate()
        .map_err(|err| RepoError::InvalidData(format!("items row {}: {err}", item.id)))?;
    Ok(item)
}

fn sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn ensure_item_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "items")? {
        return Err(RepoError::MissingRequiredTable("items"));
    }

    for column in REQUIRED_ITEM_COLUMNS {
        if !table_has_column(conn, "items", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "items",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
