//! Shared test fixtures for the flashcards SDK integration tests.
//!
//! Provides card/page builders, an in-memory `StubSource`, and an invariant
//! checker for stores.

#![allow(dead_code)]

use flashcards_sdk::{CardEntity, CardPage, CardSource, FetchError, Side, Store};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Install `env_logger` in test mode so `RUST_LOG=debug` shows dispatches.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A card with the given string fields.
pub fn card(id: &str, fields: &[(&str, &str)]) -> CardEntity {
    fields
        .iter()
        .fold(CardEntity::new(id), |card, (key, value)| card.with(key, *value))
}

/// A page of bare cards.
pub fn page(ids: &[&str], next: Option<&str>) -> CardPage {
    CardPage::new(
        ids.iter().map(|id| CardEntity::new(*id)).collect(),
        next.map(str::to_string),
    )
}

/// Assert the store invariants that must hold in every reachable state.
pub fn assert_invariants(store: &Store) {
    let mut seen = HashSet::new();
    for id in store.item_order() {
        assert!(seen.insert(id.clone()), "duplicate id {} in item_order", id);
        assert!(store.items().contains_key(id), "dangling id {} in item_order", id);
    }
    assert_eq!(seen.len(), store.items().len(), "item missing from item_order");
    assert_eq!(
        store.is_loading(),
        store.is_loading_fetch_cards() || store.is_loading_fetch_card(),
        "is_loading out of sync"
    );
}

// ---------------------------------------------------------------------------
// StubSource
// ---------------------------------------------------------------------------

/// In-memory `CardSource` keyed by cursor, card id and (id, side).
#[derive(Default)]
pub struct StubSource {
    pages: HashMap<Option<String>, CardPage>,
    cards: HashMap<String, CardEntity>,
    images: HashMap<(String, Side), String>,
    list_error: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, cursor: Option<&str>, page: CardPage) -> Self {
        self.pages.insert(cursor.map(str::to_string), page);
        self
    }

    pub fn with_card(mut self, card: CardEntity) -> Self {
        self.cards.insert(card.id.clone(), card);
        self
    }

    pub fn with_image(mut self, id: &str, side: Side, source: &str) -> Self {
        self.images.insert((id.to_string(), side), source.to_string());
        self
    }

    pub fn failing_list(mut self, message: &str) -> Self {
        self.list_error = Some(message.to_string());
        self
    }

    /// Calls made so far, e.g. `["list:-", "card:1", "image:1/A"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CardSource for StubSource {
    fn list_cards(&self, cursor: Option<&str>) -> Result<CardPage, FetchError> {
        self.record(format!("list:{}", cursor.unwrap_or("-")));
        if let Some(message) = &self.list_error {
            return Err(FetchError::new(message.clone()));
        }
        self.pages
            .get(&cursor.map(str::to_string))
            .cloned()
            .ok_or_else(|| FetchError::new(format!("no page for cursor {:?}", cursor)))
    }

    fn get_card(&self, id: &str) -> Result<CardEntity, FetchError> {
        self.record(format!("card:{}", id));
        self.cards
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::new(format!("card {} not found", id)))
    }

    fn get_image(&self, id: &str, side: Side) -> Result<String, FetchError> {
        self.record(format!("image:{}/{}", id, side));
        self.images
            .get(&(id.to_string(), side))
            .cloned()
            .ok_or_else(|| FetchError::new(format!("no image for {}/{}", id, side)))
    }
}
