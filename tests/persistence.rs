use chrono::NaiveDate;
use lifeweeks::db;
use lifeweeks::store::{AddTypeOutcome, EventStore};
use tempfile::TempDir;

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2007, 8, 1).unwrap()
}

fn db_path(dir: &TempDir) -> String {
    dir.path().join("weeks.db").to_string_lossy().into_owned()
}

#[test]
fn fresh_database_is_seeded_with_default_types() {
    let dir = TempDir::new().unwrap();
    let conn = db::init(&db_path(&dir)).unwrap();
    let store = db::load_store(&conn).unwrap();
    let names: Vec<_> = store.event_types().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Birthday", "Personal", "International"]);
    assert!(store.events().is_empty());
}

#[test]
fn store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);
    {
        let conn = db::init(&path).unwrap();
        let mut store = db::load_store(&conn).unwrap();
        assert_eq!(store.add_event_type("Work"), AddTypeOutcome::Added);
        assert!(store.set_color("Work", "#123456"));
        let first = store
            .add_event(dob(), NaiveDate::from_ymd_opt(2012, 9, 1).unwrap(), "School", "Personal")
            .id;
        store.add_event(dob(), NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(), "Job", "Work");
        assert!(store.edit_event(first, "School starts", 6));
        db::save_store(&store, &conn).unwrap();
    }

    let conn = db::init(&path).unwrap();
    let store = db::load_store(&conn).unwrap();
    let names: Vec<_> = store.event_types().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Birthday", "Personal", "International", "Work"]);
    assert_eq!(store.type_color("Work"), Some("#123456"));

    let events = store.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, 0);
    assert_eq!(events[0].title, "School starts");
    assert_eq!(events[0].week, 6 * 52);
    assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2012, 9, 1).unwrap());
    assert_eq!(events[1].id, 1);
    assert_eq!(events[1].type_name, "Work");
}

#[test]
fn ids_continue_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);
    {
        let conn = db::init(&path).unwrap();
        let mut store = db::load_store(&conn).unwrap();
        store.add_event(dob(), dob(), "Born", "Birthday");
        store.add_event(dob(), dob(), "Home", "Personal");
        db::save_store(&store, &conn).unwrap();
    }
    let conn = db::init(&path).unwrap();
    let mut store = db::load_store(&conn).unwrap();
    assert_eq!(store.add_event(dob(), dob(), "Third", "Personal").id, 2);
}

#[test]
fn deleted_default_types_stay_deleted() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);
    {
        let conn = db::init(&path).unwrap();
        let mut store = db::load_store(&conn).unwrap();
        store.add_event(dob(), dob(), "Born", "Birthday");
        assert!(store.delete_event_type("Birthday"));
        db::save_store(&store, &conn).unwrap();
    }
    let conn = db::init(&path).unwrap();
    let store = db::load_store(&conn).unwrap();
    assert!(!store.has_type("Birthday"));
    assert_eq!(store.events()[0].type_name, "Birthday");
    assert_eq!(store.legend()[0].color, "#000000");
}

#[test]
fn in_memory_database_starts_seeded() {
    let conn = db::init_in_memory().unwrap();
    let store = db::load_store(&conn).unwrap();
    assert_eq!(store.event_types().len(), EventStore::with_default_types().event_types().len());
}
