//! Loan ledger model.
//!
//! # Responsibility
//! - Represent one borrow/return event for an item.
//!
//! # Invariants
//! - At most one loan per item is [`LoanStatus::Open`] at any time.
//! - The only mutation is setting `returned_on`; there is no way back to open.
//! - Dates are caller-supplied text and are not calendar-validated.

use crate::model::item::ItemId;
use serde::{Deserialize, Serialize};

/// Storage-assigned loan identity.
pub type LoanId = i64;

/// Lifecycle state derived from the return date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Not returned yet; blocks new borrows of the same item.
    Open,
    /// Return date recorded.
    Closed,
}

/// One lending event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub borrower: String,
    pub borrowed_on: String,
    pub returned_on: Option<String>,
    /// `None` only for history kept across a session reset whose item was
    /// cleared.
    pub item_id: Option<ItemId>,
}

impl Loan {
    pub fn status(&self) -> LoanStatus {
        match self.returned_on {
            Some(_) => LoanStatus::Closed,
            None => LoanStatus::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == LoanStatus::Open
    }
}
