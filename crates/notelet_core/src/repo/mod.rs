//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contract for the note table.
//! - Isolate SQLite query details from the live store and service layers.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Deleting an unknown id is a no-op, not an error.

pub mod note_repo;
