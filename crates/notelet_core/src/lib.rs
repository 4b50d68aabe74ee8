//! Core domain logic for notelet, a local-first note-taking app.
//! This crate is the single source of truth for note persistence behavior.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{FavoriteFilter, Note, NoteFilter, NoteId, UNASSIGNED_NOTE_ID};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::NoteService;
pub use store::{NoteFeed, NoteStore, PendingWrite, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
