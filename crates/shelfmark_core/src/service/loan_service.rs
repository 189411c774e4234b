//! Loan ledger use-case service.
//!
//! # Invariants
//! - An item has at most one open loan; `borrow` reports a conflict instead
//!   of opening a second one.
//! - `return_loan` does not check that the loan is still open.

use crate::model::item::ItemId;
use crate::model::loan::{Loan, LoanId};
use crate::repo::loan_repo::LoanRepository;
use crate::service::error::{report, CatalogResult};

/// Use-case service for the loan ledger.
pub struct LoanService<R: LoanRepository> {
    repo: R,
}

impl<R: LoanRepository> LoanService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lends an item to `borrower` starting on `borrowed_on`.
    pub fn borrow(
        &self,
        item_id: ItemId,
        borrower: &str,
        borrowed_on: &str,
    ) -> CatalogResult<LoanId> {
        self.repo
            .borrow(item_id, borrower, borrowed_on)
            .map_err(|err| report("loan_borrow", err))
    }

    /// Records the return date of a loan.
    pub fn return_loan(&self, loan_id: LoanId, returned_on: &str) -> CatalogResult<()> {
        self.repo
            .return_loan(loan_id, returned_on)
            .map_err(|err| report("loan_return", err))
    }

    pub fn get_loan(&self, loan_id: LoanId) -> CatalogResult<Option<Loan>> {
        self.repo
            .get_loan(loan_id)
            .map_err(|err| report("loan_get", err))
    }

    pub fn open_loan_for_item(&self, item_id: ItemId) -> CatalogResult<Option<Loan>> {
        self.repo
            .open_loan_for_item(item_id)
            .map_err(|err| report("loan_get", err))
    }

    /// Lists the whole ledger in creation order.
    pub fn list_loans(&self) -> CatalogResult<Vec<Loan>> {
        self.repo
            .list_loans()
            .map_err(|err| report("loan_list", err))
    }
}
