//! Loan ledger repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Record borrow events and their return dates.
//!
//! # Invariants
//! - Item existence and the "no open loan" check run inside the same
//!   immediate transaction as the insert; a partial unique index backs it.
//! - `return_loan` only requires the loan to exist. Returning a closed loan
//!   overwrites its return date.
//! - Listing order is creation order (`id ASC`).

use crate::model::item::ItemId;
use crate::model::loan::{Loan, LoanId};
use crate::model::text::require_text;
use crate::repo::error::{Conflict, Missing, RepoError, RepoResult};
use crate::repo::item_repo::item_exists;
use crate::repo::schema::{ensure_connection_ready, RequiredTable};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const LOAN_SELECT_SQL: &str = "SELECT
    id,
    borrower,
    borrowed_on,
    returned_on,
    item_id
FROM loans";

const REQUIRED_TABLES: &[RequiredTable] = &[
    ("items", &["id"]),
    (
        "loans",
        &["id", "borrower", "borrowed_on", "returned_on", "item_id"],
    ),
];

/// Repository interface for the loan ledger.
pub trait LoanRepository {
    /// Opens a loan for an item that is not currently lent out.
    fn borrow(&self, item_id: ItemId, borrower: &str, borrowed_on: &str) -> RepoResult<LoanId>;
    /// Records the return date of an existing loan.
    fn return_loan(&self, loan_id: LoanId, returned_on: &str) -> RepoResult<()>;
    fn get_loan(&self, loan_id: LoanId) -> RepoResult<Option<Loan>>;
    /// Returns the loan currently blocking the item, if any.
    fn open_loan_for_item(&self, item_id: ItemId) -> RepoResult<Option<Loan>>;
    /// Lists every loan in creation order.
    fn list_loans(&self) -> RepoResult<Vec<Loan>>;
}

/// SQLite-backed loan repository.
pub struct SqliteLoanRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLoanRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }
}

impl LoanRepository for SqliteLoanRepository<'_> {
    fn borrow(&self, item_id: ItemId, borrower: &str, borrowed_on: &str) -> RepoResult<LoanId> {
        let borrower = require_text("borrower", borrower)?;
        let borrowed_on = require_text("borrowed_on", borrowed_on)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !item_exists(&tx, item_id)? {
            warn!("event=loan_borrow module=repo status=not_found item_id={item_id}");
            return Err(RepoError::NotFound(Missing::Item(item_id)));
        }

        if let Some(open) = query_open_loan(&tx, item_id)? {
            info!(
                "event=loan_borrow module=repo status=conflict item_id={item_id} open_loan_id={}",
                open.id
            );
            return Err(RepoError::Conflict(Conflict::ItemOnLoan {
                item_id,
                loan_id: open.id,
            }));
        }

        tx.execute(
            "INSERT INTO loans (borrower, borrowed_on, item_id) VALUES (?1, ?2, ?3);",
            params![borrower.as_str(), borrowed_on.as_str(), item_id],
        )?;
        let loan_id = tx.last_insert_rowid();
        tx.commit()?;

        info!("event=loan_borrow module=repo status=ok item_id={item_id} loan_id={loan_id}");
        Ok(loan_id)
    }

    fn return_loan(&self, loan_id: LoanId, returned_on: &str) -> RepoResult<()> {
        let returned_on = require_text("returned_on", returned_on)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE loans SET returned_on = ?2 WHERE id = ?1;",
            params![loan_id, returned_on.as_str()],
        )?;
        if changed == 0 {
            warn!("event=loan_return module=repo status=not_found loan_id={loan_id}");
            return Err(RepoError::NotFound(Missing::Loan(loan_id)));
        }
        tx.commit()?;

        info!("event=loan_return module=repo status=ok loan_id={loan_id}");
        Ok(())
    }

    fn get_loan(&self, loan_id: LoanId) -> RepoResult<Option<Loan>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOAN_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([loan_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_loan_row(row)?));
        }

        Ok(None)
    }

    fn open_loan_for_item(&self, item_id: ItemId) -> RepoResult<Option<Loan>> {
        query_open_loan(self.conn, item_id)
    }

    fn list_loans(&self) -> RepoResult<Vec<Loan>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOAN_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut loans = Vec::new();
        while let Some(row) = rows.next()? {
            loans.push(parse_loan_row(row)?);
        }
        Ok(loans)
    }
}

fn query_open_loan(conn: &Connection, item_id: ItemId) -> RepoResult<Option<Loan>> {
    let loan = conn
        .query_row(
            &format!(
                "{LOAN_SELECT_SQL}
                 WHERE item_id = ?1
                   AND returned_on IS NULL
                 ORDER BY id ASC
                 LIMIT 1;"
            ),
            [item_id],
            parse_loan_row,
        )
        .optional()?;
    Ok(loan)
}

fn parse_loan_row(row: &Row<'_>) -> rusqlite::Result<Loan> {
    Ok(Loan {
        id: row.get("id")?,
        borrower: row.get("borrower")?,
        borrowed_on: row.get("borrowed_on")?,
        returned_on: row.get("returned_on")?,
        item_id: row.get("item_id")?,
    })
}
