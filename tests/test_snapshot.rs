//! Snapshot persistence tests against temporary directories.

mod common;

use common::{assert_invariants, card, page, StubSource};
use flashcards_sdk::config::SNAPSHOT_FILE;
use flashcards_sdk::snapshot::{load_snapshot, save_snapshot};
use flashcards_sdk::{reduce, Action, CardStore, FlashcardsError, Side, Store};
use serde_json::json;
use std::fs;

fn populated() -> Store {
    let actions = [
        Action::fetch_cards_response(page(&["1", "2", "3"], Some("n1"))),
        Action::fetch_card_response(card("2", &[("sideAText", "front")])),
        Action::flip_card("2"),
        Action::fetch_image_response("1", Side::A, "a.png"),
        Action::fetch_image_error("1", Side::B, flashcards_sdk::FetchError::new("gone")),
    ];
    actions.iter().fold(Store::new(), reduce)
}

// ---------------------------------------------------------------------------
// save / load
// ---------------------------------------------------------------------------

#[test]
fn save_then_load_restores_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join(SNAPSHOT_FILE);
    let store = populated();

    save_snapshot(&store, &path).unwrap();
    let loaded = load_snapshot(&path).unwrap().unwrap();

    assert_eq!(loaded, store);
    assert_eq!(loaded.item_order(), ["1", "2", "3"]);
    assert_eq!(loaded.active_side("2"), Side::B);
    assert_eq!(loaded.next(), Some("n1"));
    assert!(!path.with_file_name(format!("{}.tmp", SNAPSHOT_FILE)).exists());
}

#[test]
fn load_clears_in_flight_flags() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(SNAPSHOT_FILE);
    let in_flight = [
        Action::fetch_cards(),
        Action::fetch_card(),
        Action::fetch_image("1", Side::A),
    ]
    .iter()
    .fold(populated(), reduce);
    assert!(in_flight.is_loading());

    save_snapshot(&in_flight, &path).unwrap();
    let loaded = load_snapshot(&path).unwrap().unwrap();

    assert!(!loaded.is_loading());
    assert!(!loaded.is_loading_fetch_cards());
    assert!(!loaded.is_loading_fetch_card());
    let image = loaded.image("1", Side::A).unwrap();
    assert!(!image.is_loading);
    assert_eq!(image.source.as_deref(), Some("a.png"));
}

#[test]
fn missing_snapshot_loads_as_none() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(load_snapshot(&tmp.path().join(SNAPSHOT_FILE)).unwrap().is_none());
}

#[test]
fn corrupt_snapshot_is_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(SNAPSHOT_FILE);
    fs::write(&path, "{\"version\": 1, \"store\": {\"items\": [").unwrap();

    let err = load_snapshot(&path).unwrap_err();
    assert!(matches!(err, FlashcardsError::CorruptSnapshot(_)));
    assert!(!path.exists());
}

#[test]
fn other_format_version_is_discarded() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(SNAPSHOT_FILE);
    fs::write(&path, json!({"version": 999, "store": {}}).to_string()).unwrap();

    assert!(load_snapshot(&path).unwrap().is_none());
    assert!(!path.exists());
}

#[test]
fn inconsistent_order_is_repaired_on_load() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(SNAPSHOT_FILE);
    let raw = json!({
        "version": 1,
        "store": {
            "items": {"a": {"id": "a"}, "b": {"id": "b"}, "c": {"id": "c"}},
            "itemOrder": ["b", "ghost", "b", "a"],
            "isLoading": true
        }
    });
    fs::write(&path, raw.to_string()).unwrap();

    let loaded = load_snapshot(&path).unwrap().unwrap();
    assert_eq!(loaded.item_order(), ["b", "ghost", "a", "c"]);
    assert_eq!(loaded.item("ghost").map(|c| c.id.as_str()), Some("ghost"));
    assert!(!loaded.is_loading());
    assert_invariants(&loaded);
}

// ---------------------------------------------------------------------------
// CardStore integration
// ---------------------------------------------------------------------------

#[test]
fn card_store_persists_and_restores() {
    let tmp = tempfile::tempdir().unwrap();
    let source = StubSource::new().with_page(None, page(&["x", "y"], None));

    let mut store = CardStore::builder().cache_dir(tmp.path()).build().unwrap();
    store.load_cards(&source, None);
    store.flip_card("y");
    store.persist().unwrap();
    assert!(tmp.path().join(SNAPSHOT_FILE).exists());

    let restored = CardStore::builder()
        .cache_dir(tmp.path())
        .restore(true)
        .build()
        .unwrap();
    assert_eq!(restored.state(), store.state());
    assert!(!restored.query_cache().has_cache);
}

#[test]
fn restore_without_snapshot_keeps_initial_state() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = CardStore::builder().cache_dir(tmp.path()).build().unwrap();
    assert!(!store.restore().unwrap());
    assert!(store.state().is_empty());
}

#[test]
fn clear_snapshot_removes_file_and_tolerates_absence() {
    let tmp = tempfile::tempdir().unwrap();
    let store = CardStore::builder()
        .snapshot_path(tmp.path().join("cards.json"))
        .build()
        .unwrap();
    store.persist().unwrap();
    store.clear_snapshot().unwrap();
    assert!(!tmp.path().join("cards.json").exists());
    store.clear_snapshot().unwrap();
}

#[test]
fn persist_on_dispatch_saves_after_every_action() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(SNAPSHOT_FILE);
    let mut store = CardStore::builder()
        .snapshot_path(&path)
        .persist_on_dispatch(true)
        .build()
        .unwrap();

    store.dispatch(&Action::fetch_cards_response(page(&["1", "2"], Some("n1"))));
    let saved = load_snapshot(&path).unwrap().unwrap();
    assert_eq!(saved.item_order(), ["1", "2"]);

    store.flip_card("2");
    let saved = load_snapshot(&path).unwrap().unwrap();
    assert_eq!(saved.active_side("2"), Side::B);
    assert_eq!(&saved, store.state());
}

#[test]
fn failed_save_on_dispatch_keeps_transition() {
    common::init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let mut store = CardStore::builder()
        .snapshot_path(blocker.join(SNAPSHOT_FILE))
        .persist_on_dispatch(true)
        .build()
        .unwrap();

    store.dispatch(&Action::fetch_card_response(card("1", &[])));
    assert_eq!(store.state().item_order(), ["1"]);
    assert!(!blocker.join(SNAPSHOT_FILE).exists());
}

#[test]
fn persist_on_dispatch_without_path_fails_to_build() {
    let result = CardStore::builder().persist_on_dispatch(true).build();
    assert!(matches!(result, Err(FlashcardsError::InvalidArgument(_))));
}
