//! Session reset applied by catalog initialization.
//!
//! # Responsibility
//! - Clear data left behind by a previous session so each launch starts from
//!   an empty catalog.
//!
//! # Invariants
//! - The reset is all-or-nothing: it runs inside one transaction.
//! - Identity sequences are not rewound; ids stay unique across sessions.
//! - Under [`ResetPolicy::KeepLoans`] surviving loans lose their item
//!   reference (`item_id` becomes NULL) instead of blocking the reset.

use super::DbResult;
use crate::config::ResetPolicy;
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Row counts removed by [`reset_session`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetSummary {
    pub items: usize,
    pub tags: usize,
    pub loans: usize,
}

/// Clears prior session data according to `policy`.
pub fn reset_session(conn: &mut Connection, policy: ResetPolicy) -> DbResult<ResetSummary> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let loans = match policy {
        ResetPolicy::ClearAll => tx.execute("DELETE FROM loans;", [])?,
        ResetPolicy::KeepLoans => 0,
    };
    let tags = tx.execute("DELETE FROM item_tags;", [])?;
    let items = tx.execute("DELETE FROM items;", [])?;
    tx.commit()?;

    info!(
        "event=session_reset module=db status=ok policy={} items={} tags={} loans={}",
        policy.as_str(),
        items,
        tags,
        loans
    );
    Ok(ResetSummary { items, tags, loans })
}
