use notelet_core::db::open_db_in_memory;
use notelet_core::{FavoriteFilter, Note, NoteFilter, NoteRepository, SqliteNoteRepository};
use rusqlite::Connection;

fn seed(conn: &Connection) -> Vec<i64> {
    let repo = SqliteNoteRepository::new(conn);
    [
        Note::new("Meeting notes", "discuss roadmap", true),
        Note::new("Groceries", "milk, eggs", false),
        Note::new("Weekly meeting", "standup agenda", false),
        Note::new("Trip plan", "pack bags", true),
    ]
    .iter()
    .map(|note| repo.insert(note).unwrap())
    .collect()
}

#[test]
fn blank_filters_with_any_favorite_match_everything() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteNoteRepository::new(&conn);

    let filter = NoteFilter::from_input("", "", FavoriteFilter::Any);
    let hits = repo.search(&filter).unwrap();
    assert_eq!(hits.len(), 4);
    // Same ordering contract as the unfiltered list.
    assert_eq!(hits, repo.list_all().unwrap());
}

#[test]
fn blank_filters_with_non_favorites_return_only_unflagged_notes() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteNoteRepository::new(&conn);

    let filter = NoteFilter::from_input("", "", FavoriteFilter::NonFavorites);
    let hits = repo.search(&filter).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|note| !note.is_favorite));
}

#[test]
fn title_and_favorite_predicates_are_conjunctive() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteNoteRepository::new(&conn);

    let filter = NoteFilter::from_input("Meeting", "", FavoriteFilter::Favorites);
    let hits = repo.search(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Meeting notes");
    assert!(hits[0].is_favorite);
}

#[test]
fn title_matching_is_substring_and_ascii_case_insensitive() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteNoteRepository::new(&conn);

    let filter = NoteFilter::from_input("trip", "", FavoriteFilter::Favorites);
    let hits = repo.search(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Trip plan");

    let filter = NoteFilter::from_input("meeting", "", FavoriteFilter::Any);
    let hits = repo.search(&filter).unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn content_filter_matches_body_substrings() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteNoteRepository::new(&conn);

    let filter = NoteFilter::from_input("", "milk", FavoriteFilter::Any);
    let hits = repo.search(&filter).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Groceries");

    // Conjunction across all three predicates leaves no match here.
    let filter = NoteFilter::from_input("Groceries", "milk", FavoriteFilter::Favorites);
    assert!(repo.search(&filter).unwrap().is_empty());
}

#[test]
fn search_results_keep_newest_first_ordering() {
    let conn = open_db_in_memory().unwrap();
    let ids = seed(&conn);
    let repo = SqliteNoteRepository::new(&conn);

    let filter = NoteFilter::from_input("meeting", "", FavoriteFilter::Any);
    let hits = repo.search(&filter).unwrap();
    assert_eq!(
        hits.iter().map(|note| note.id).collect::<Vec<_>>(),
        vec![ids[2], ids[0]]
    );
}
