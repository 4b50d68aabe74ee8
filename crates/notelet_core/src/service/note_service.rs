//! Note use-case service, the UI-facing facade over the live store.
//!
//! # Responsibility
//! - Translate UI intents (add/update/delete/search) into store calls.
//! - Re-export the store's live feeds without caching any record state.
//!
//! # Invariants
//! - Mutations are fire-and-forget for the UI; outcomes stay observable
//!   through [`NoteStore`] tickets for callers that need them.
//! - Every `search` call produces a fresh feed; previous filter results
//!   are never reused.
//! - The service performs no input validation; non-blank title/content is
//!   enforced by the UI before invocation.

use crate::model::note::{FavoriteFilter, Note, NoteFilter};
use crate::store::{NoteFeed, NoteStore};

/// UI-facing facade owning the live store.
///
/// Dropping the service shuts the store down: pending writes are not
/// acknowledged and all feeds end.
pub struct NoteService {
    store: NoteStore,
}

impl NoteService {
    /// Creates a service over an explicitly constructed store.
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }

    /// Creates a new note and submits it for insertion.
    ///
    /// Fire-and-forget: returns immediately, the id is assigned on the
    /// store worker.
    pub fn add_note(&self, title: impl Into<String>, content: impl Into<String>, is_favorite: bool) {
        let _ = self.store.insert(Note::new(title, content, is_favorite));
    }

    /// Submits a wholesale replacement of an existing note, keyed by id.
    pub fn update_note(&self, note: Note) {
        let _ = self.store.update(note);
    }

    /// Submits a delete for the given note.
    pub fn delete_note(&self, note: &Note) {
        let _ = self.store.delete(note.id);
    }

    /// Live feed of the full note list, most recently created first.
    pub fn notes(&self) -> NoteFeed {
        self.store.watch_all()
    }

    /// Live feed of the filtered note list.
    ///
    /// Blank title/content inputs match every note; the favorite filter is
    /// explicit three-state. Re-invoked by the UI on every input change.
    pub fn search(&self, title: &str, content: &str, favorite: FavoriteFilter) -> NoteFeed {
        self.store
            .watch(NoteFilter::from_input(title, content, favorite))
    }

    /// Direct store access, for callers that need to await write outcomes.
    pub fn store(&self) -> &NoteStore {
        &self.store
    }
}
