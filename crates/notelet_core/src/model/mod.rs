//! Domain model for notes and note filters.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the store.
//! - Define the filter shape used by the search query.
//!
//! # Invariants
//! - Every persisted note is identified by a stable `NoteId`.
//! - A note is either fully present (all four fields) or absent; there is
//!   no partial-record state.

pub mod note;
