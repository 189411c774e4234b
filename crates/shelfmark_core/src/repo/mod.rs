//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for items, tags and
//!   loans.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories borrow one shared connection; none of them owns it.
//! - Every mutation runs its existence/conflict checks and its write inside
//!   one immediate transaction.
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`) in
//!   addition to DB transport errors.

pub mod error;
pub mod item_repo;
pub mod loan_repo;
mod schema;
pub mod tag_repo;
