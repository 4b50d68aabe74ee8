//! Note record and search filter definitions.
//!
//! # Responsibility
//! - Define the `Note` record shape shared by repository, store and service.
//! - Define the three-state favorite filter and the conjunctive search
//!   filter used by live queries.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never reused afterwards.
//! - `UNASSIGNED_NOTE_ID` marks a note that has not been persisted yet.
//! - Filter components normalized to `None` match every note.

use serde::{Deserialize, Serialize};

/// Stable identifier for a persisted note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Values come from the SQLite `AUTOINCREMENT` rowid domain.
pub type NoteId = i64;

/// Sentinel id carried by notes that have not been inserted yet.
pub const UNASSIGNED_NOTE_ID: NoteId = 0;

/// A single user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Storage-assigned id. `UNASSIGNED_NOTE_ID` before first insert.
    pub id: NoteId,
    /// Note title. Non-blank enforcement is a UI concern, not a store one.
    pub title: String,
    /// Note body text.
    pub content: String,
    /// Favorite flag. Serialized as `isFavorite` to match the external
    /// schema naming used by the app layer.
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

impl Note {
    /// Creates a not-yet-persisted note. The store assigns the real id
    /// during insert.
    pub fn new(title: impl Into<String>, content: impl Into<String>, is_favorite: bool) -> Self {
        Self {
            id: UNASSIGNED_NOTE_ID,
            title: title.into(),
            content: content.into(),
            is_favorite,
        }
    }

    /// Creates a note with a known id. Used by read-back paths.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        is_favorite: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            is_favorite,
        }
    }

    /// Returns `true` once storage has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_NOTE_ID
    }
}

/// Three-state favorite predicate for the search query.
///
/// The flag filter is explicit rather than a plain `bool`, so "ignore the
/// favorite flag" is expressible instead of forcing callers to pick a
/// concrete boolean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteFilter {
    /// Match every note regardless of flag state.
    #[default]
    Any,
    /// Match only notes with the favorite flag set.
    Favorites,
    /// Match only notes with the favorite flag cleared.
    NonFavorites,
}

impl FavoriteFilter {
    /// Evaluates the predicate against one note's flag.
    pub fn matches(self, is_favorite: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Favorites => is_favorite,
            Self::NonFavorites => !is_favorite,
        }
    }
}

/// Conjunctive search filter over the note table.
///
/// All present components must match. Substring matching uses SQLite
/// `LIKE`, which is case-insensitive for ASCII.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Substring the title must contain. `None` matches every title.
    pub title: Option<String>,
    /// Substring the content must contain. `None` matches every body.
    pub content: Option<String>,
    /// Favorite flag predicate.
    pub favorite: FavoriteFilter,
}

impl NoteFilter {
    /// Builds a filter from raw UI input.
    ///
    /// Empty or whitespace-only title/content components collapse to
    /// match-all, mirroring how a blank search box means "no constraint".
    pub fn from_input(title: &str, content: &str, favorite: FavoriteFilter) -> Self {
        Self {
            title: normalize_component(title),
            content: normalize_component(content),
            favorite,
        }
    }

    /// Returns `true` when no component constrains the result.
    pub fn is_match_all(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.favorite == FavoriteFilter::Any
    }
}

fn normalize_component(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
