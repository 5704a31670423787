//! Domain model for periodic note resolution.
//!
//! # Responsibility
//! - Define the period kinds, normalized period keys and note references used
//!   by classification, indexing and resolution.
//! - Define the leaf identity the host hands to the orchestrator.
//!
//! # Invariants
//! - Notes are identified by vault-relative `/`-separated paths.
//! - Period keys always carry the first day of their period.

pub mod leaf;
pub mod note;
pub mod period;
