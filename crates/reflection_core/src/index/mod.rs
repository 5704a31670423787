//! Session-scoped periodic note index.
//!
//! # Responsibility
//! - Map normalized period keys to the note representing each period.
//!
//! # Invariants
//! - Built once per session from a full host scan; never updated in place.
//! - At most one note per key; the first enumerated note wins.

pub mod note_index;
