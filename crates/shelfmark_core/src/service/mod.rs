//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Map repository failures onto the caller-facing [`error::CatalogError`].
//! - Keep presentation layers decoupled from storage details.

pub mod catalog_service;
pub mod error;
pub mod loan_service;
pub mod tag_service;
