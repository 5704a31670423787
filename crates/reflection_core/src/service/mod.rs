//! Core use-case services.
//!
//! # Responsibility
//! - Classify files, resolve prior periods and gate redundant work.
//! - Orchestrate host events into render instructions.
//!
//! # Invariants
//! - Services read the index snapshot; none of them mutates it.

pub mod classifier;
pub mod orchestrator;
pub mod preview;
pub mod resolver;
pub mod staleness;
