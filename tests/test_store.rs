//! `CardStore` facade tests against an in-memory `StubSource`.

mod common;

use common::{assert_invariants, card, init_logging, page, StubSource};
use flashcards_sdk::{Action, CardEntity, CardStore, FetchError, FlashcardsError, Side};
use serde_json::json;

// ---------------------------------------------------------------------------
// load_cards / load_next_page
// ---------------------------------------------------------------------------

#[test]
fn load_cards_populates_store_and_query_cache() {
    init_logging();
    let source = StubSource::new().with_page(None, page(&["1", "2"], Some("p2")));
    let mut store = CardStore::new();
    assert!(!store.query_cache().has_cache);

    let cache = store.load_cards(&source, None);
    assert!(cache.has_cache);
    assert_eq!(cache.pages, 1);
    assert_eq!(store.state().item_order(), ["1", "2"]);
    assert_eq!(store.state().next(), Some("p2"));
    assert!(!store.state().is_loading());
    assert_invariants(store.state());
}

#[test]
fn load_next_page_follows_cursor_until_exhausted() {
    let source = StubSource::new()
        .with_page(None, page(&["1", "2"], Some("p2")))
        .with_page(Some("p2"), page(&["2", "3"], Some("p3")))
        .with_page(Some("p3"), page(&["4"], None));
    let mut store = CardStore::new();
    store.load_cards(&source, None);

    assert!(store.load_next_page(&source));
    assert!(store.load_next_page(&source));
    assert!(!store.load_next_page(&source));

    assert_eq!(store.state().item_order(), ["1", "2", "3", "4"]);
    assert_eq!(store.query_cache().pages, 3);
    assert_eq!(source.calls(), vec!["list:-", "list:p2", "list:p3"]);
}

#[test]
fn failed_list_fetch_records_error_without_cache() {
    let source = StubSource::new().failing_list("network down");
    let mut store = CardStore::new();

    let cache = store.load_cards(&source, None);
    assert!(!cache.has_cache);
    assert_eq!(store.state().error(), Some(&FetchError::new("network down")));
    assert!(!store.state().is_loading());
}

// ---------------------------------------------------------------------------
// load_card
// ---------------------------------------------------------------------------

#[test]
fn load_card_merges_into_listed_card() {
    let source = StubSource::new()
        .with_page(None, page(&["1", "2"], None))
        .with_card(card("1", &[("sideAText", "front"), ("lastTestTime", "t0")]));
    let mut store = CardStore::new();
    store.load_cards(&source, None);

    let loaded = store.load_card(&source, "1").unwrap();
    assert_eq!(loaded.text(Side::A), Some("front"));
    assert_eq!(store.state().item_order(), ["1", "2"]);
    assert_invariants(store.state());
}

#[test]
fn load_card_failure_returns_none_and_records_error() {
    let source = StubSource::new();
    let mut store = CardStore::new();
    assert!(store.load_card(&source, "missing").is_none());
    assert_eq!(
        store.state().error().map(|e| e.message.as_str()),
        Some("card missing not found")
    );
    assert!(!store.state().is_loading_fetch_card());
}

// ---------------------------------------------------------------------------
// load_image / flip_card
// ---------------------------------------------------------------------------

#[test]
fn load_image_sets_source_for_one_side() {
    let source = StubSource::new().with_image("1", Side::A, "https://img/1a.png");
    let mut store = CardStore::new();

    let image = store.load_image(&source, "1", Side::A).unwrap();
    assert!(!image.is_loading);
    assert_eq!(image.source.as_deref(), Some("https://img/1a.png"));

    let other = store.load_image(&source, "1", Side::B).unwrap();
    assert!(other.error.is_some());
    assert_eq!(
        store.state().image("1", Side::A).unwrap().source.as_deref(),
        Some("https://img/1a.png")
    );
}

#[test]
fn flip_card_returns_new_side() {
    let mut store = CardStore::new();
    assert_eq!(store.flip_card("a"), Side::B);
    assert_eq!(store.flip_card("a"), Side::A);
}

// ---------------------------------------------------------------------------
// dispatch
// ---------------------------------------------------------------------------

#[test]
fn dispatch_replaces_store() {
    let mut store = CardStore::new();
    let state = store.dispatch(&Action::fetch_card_response(CardEntity::new("x")));
    assert_eq!(state.item_order(), ["x"]);
    assert_eq!(store.state().len(), 1);
}

#[test]
fn dispatch_json_ignores_unknown_actions() {
    let mut store = CardStore::new();
    store
        .dispatch_json(json!({"type": "cards/flipCard", "payload": "1"}))
        .unwrap();
    let before = store.state().clone();

    store
        .dispatch_json(json!({"type": "session/signOut", "payload": {"user": "u"}}))
        .unwrap();
    assert_eq!(store.state(), &before);
}

// ---------------------------------------------------------------------------
// Builder / Display
// ---------------------------------------------------------------------------

#[test]
fn builder_with_initial_state() {
    let initial = flashcards_sdk::reduce(
        flashcards_sdk::Store::new(),
        &Action::fetch_card_response(CardEntity::new("seed")),
    );
    let store = CardStore::builder().initial_state(initial).build().unwrap();
    assert!(store.state().item("seed").is_some());
}

#[test]
fn persist_without_snapshot_path_is_an_error() {
    let store = CardStore::new();
    assert!(matches!(store.persist(), Err(FlashcardsError::InvalidArgument(_))));
}

#[test]
fn restore_requested_without_snapshot_path_fails_to_build() {
    let result = CardStore::builder().restore(true).build();
    assert!(matches!(result, Err(FlashcardsError::InvalidArgument(_))));
}

#[test]
fn display_summarizes_store() {
    let mut store = CardStore::new();
    store.dispatch(&Action::fetch_cards());
    assert_eq!(
        store.to_string(),
        "CardStore(cards=0, loading=true, has_cache=false, snapshot=none)"
    );
}
