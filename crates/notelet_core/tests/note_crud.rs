use notelet_core::db::open_db_in_memory;
use notelet_core::{Note, NoteRepository, RepoError, SqliteNoteRepository};

#[test]
fn insert_assigns_fresh_ids_and_lists_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let first = repo.insert(&Note::new("first", "body one", false)).unwrap();
    let second = repo.insert(&Note::new("second", "body two", true)).unwrap();
    let third = repo.insert(&Note::new("third", "body three", false)).unwrap();
    assert!(first < second && second < third);

    let listed = repo.list_all().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(
        listed.iter().map(|note| note.id).collect::<Vec<_>>(),
        vec![third, second, first]
    );
    assert_eq!(listed[0].title, "third");
    assert!(listed[1].is_favorite);
}

#[test]
fn update_replaces_all_fields_and_leaves_others_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let keep_id = repo.insert(&Note::new("keep", "unchanged", false)).unwrap();
    let edit_id = repo.insert(&Note::new("edit", "old body", false)).unwrap();

    repo.update(&Note::with_id(edit_id, "edited", "new body", true))
        .unwrap();

    let listed = repo.list_all().unwrap();
    let edited = listed.iter().find(|note| note.id == edit_id).unwrap();
    assert_eq!(edited.title, "edited");
    assert_eq!(edited.content, "new body");
    assert!(edited.is_favorite);

    let kept = listed.iter().find(|note| note.id == keep_id).unwrap();
    assert_eq!(kept.title, "keep");
    assert_eq!(kept.content, "unchanged");
    assert!(!kept.is_favorite);
}

#[test]
fn update_of_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let err = repo
        .update(&Note::with_id(999, "ghost", "never stored", false))
        .unwrap_err();
    match err {
        RepoError::NotFound(id) => assert_eq!(id, 999),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn delete_removes_exactly_one_note_and_unknown_id_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let first = repo.insert(&Note::new("first", "body one", false)).unwrap();
    let second = repo.insert(&Note::new("second", "body two", true)).unwrap();

    repo.delete(first).unwrap();

    let listed = repo.list_all().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, second);
    assert_eq!(listed[0].title, "second");
    assert_eq!(listed[0].content, "body two");
    assert!(listed[0].is_favorite);

    // Deleted ids stay retired, unknown ids are ignored.
    repo.delete(first).unwrap();
    repo.delete(42).unwrap();
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn deleted_ids_are_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let first = repo.insert(&Note::new("first", "body", false)).unwrap();
    repo.delete(first).unwrap();

    let second = repo.insert(&Note::new("second", "body", false)).unwrap();
    assert!(second > first);
}

#[test]
fn update_with_identical_fields_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let id = repo
        .insert(&Note::new("Groceries", "milk, eggs", false))
        .unwrap();
    let original = repo.list_all().unwrap().remove(0);

    repo.update(&Note::with_id(id, "Groceries", "milk, eggs", false))
        .unwrap();

    let after = repo.list_all().unwrap().remove(0);
    assert_eq!(after, original);
    assert_eq!(after.id, id);
}
