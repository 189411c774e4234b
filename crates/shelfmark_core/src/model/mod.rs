//! Catalog domain model.
//!
//! # Responsibility
//! - Define the records owned by the catalog store, tag index and loan ledger.
//! - Provide input normalization and validation shared by write paths.
//!
//! # Invariants
//! - Identities are assigned by storage and never reused.
//! - Tags and loans reference items by identity only.

pub mod item;
pub mod loan;
pub mod tag;
pub mod text;
