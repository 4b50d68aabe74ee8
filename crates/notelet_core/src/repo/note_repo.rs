//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered-read APIs over the `notes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `insert` always assigns a fresh id; caller-supplied ids are ignored.
//! - `update` replaces title/content/favorite wholesale and fails with
//!   `NotFound` when the id does not exist.
//! - `delete` of an unknown id is a no-op.
//! - Read queries return notes ordered by id descending.

use crate::db::DbError;
use crate::model::note::{FavoriteFilter, Note, NoteFilter, NoteId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT id, title, content, is_favorite FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note CRUD and search operations.
pub trait NoteRepository {
    /// Inserts one note and returns the storage-assigned id.
    fn insert(&self, note: &Note) -> RepoResult<NoteId>;
    /// Replaces title/content/favorite for an existing id.
    fn update(&self, note: &Note) -> RepoResult<()>;
    /// Removes one note by id. Unknown ids are ignored.
    fn delete(&self, id: NoteId) -> RepoResult<()>;
    /// Returns every note, most recently created first.
    fn list_all(&self) -> RepoResult<Vec<Note>>;
    /// Returns notes matching every present filter component.
    fn search(&self, filter: &NoteFilter) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert(&self, note: &Note) -> RepoResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (title, content, is_favorite) VALUES (?1, ?2, ?3);",
            params![note.title, note.content, note.is_favorite],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, note: &Note) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET title = ?2, content = ?3, is_favorite = ?4
             WHERE id = ?1;",
            params![note.id, note.title, note.content, note.is_favorite],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }

        Ok(())
    }

    fn delete(&self, id: NoteId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM notes WHERE id = ?1;", params![id])?;
        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<Note>> {
        let sql = format!("{NOTE_SELECT_SQL} ORDER BY id DESC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(note_from_row(row)?);
        }
        Ok(notes)
    }

    fn search(&self, filter: &NoteFilter) -> RepoResult<Vec<Note>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE 1=1");
        let mut bind_values: Vec<Value> = Vec::new();

        // LIKE is case-insensitive for ASCII, which is the contract for
        // title/content substring matching.
        if let Some(title) = filter.title.as_ref() {
            sql.push_str(" AND title LIKE '%' || ? || '%'");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(content) = filter.content.as_ref() {
            sql.push_str(" AND content LIKE '%' || ? || '%'");
            bind_values.push(Value::Text(content.clone()));
        }
        match filter.favorite {
            FavoriteFilter::Any => {}
            FavoriteFilter::Favorites => sql.push_str(" AND is_favorite = 1"),
            FavoriteFilter::NonFavorites => sql.push_str(" AND is_favorite = 0"),
        }

        sql.push_str(" ORDER BY id DESC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(note_from_row(row)?);
        }
        Ok(notes)
    }
}

fn note_from_row(row: &Row<'_>) -> RepoResult<Note> {
    let flag: i64 = row.get("is_favorite")?;
    if flag != 0 && flag != 1 {
        return Err(RepoError::InvalidData(format!(
            "is_favorite must be 0 or 1, found {flag}"
        )));
    }

    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        is_favorite: flag == 1,
    })
}
