//! The normalized card store folded by the reducer.
//!
//! Cards live in an id-keyed map with a separate first-seen order list.
//! Active sides and per-side image state are two more id-keyed maps, kept
//! apart from the cards so that flipping a card or loading an image never
//! touches card data.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::models::{CardEntity, CardImages, ImageState, Side};

/// Client-side card cache.
///
/// Fields are private so the invariants hold for every reachable value:
///
/// - `item_order` lists each id of `items` exactly once, in first-seen order;
/// - `is_loading` equals `is_loading_fetch_cards || is_loading_fetch_card`.
///
/// `is_loading` is derived rather than stored. Decoding a store (from a
/// snapshot or any other JSON) repairs its order before the value exists, so
/// the reducer only ever sees consistent stores. Read it through the
/// selector methods; change it only through [`reduce`](crate::reducer::reduce).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoreRepr", into = "StoreRepr")]
pub struct Store {
    items: HashMap<String, CardEntity>,
    item_order: Vec<String>,
    active_sides: HashMap<String, Side>,
    images: HashMap<String, CardImages>,
    is_loading_fetch_cards: bool,
    is_loading_fetch_card: bool,
    error: Option<FetchError>,
    next: Option<String>,
}

/// Wire form of [`Store`]. `isLoading` is written for readers of the JSON
/// and ignored when decoding.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoreRepr {
    items: HashMap<String, CardEntity>,
    item_order: Vec<String>,
    active_sides: HashMap<String, Side>,
    images: HashMap<String, CardImages>,
    is_loading: bool,
    is_loading_fetch_cards: bool,
    is_loading_fetch_card: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<FetchError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
}

impl From<StoreRepr> for Store {
    fn from(repr: StoreRepr) -> Self {
        let mut store = Store {
            items: repr.items,
            item_order: repr.item_order,
            active_sides: repr.active_sides,
            images: repr.images,
            is_loading_fetch_cards: repr.is_loading_fetch_cards,
            is_loading_fetch_card: repr.is_loading_fetch_card,
            error: repr.error,
            next: repr.next,
        };
        let repaired = store.repair_order();
        if repaired > 0 {
            log::warn!("Decoded store had {} inconsistent order entries; repaired", repaired);
        }
        store
    }
}

impl From<Store> for StoreRepr {
    fn from(store: Store) -> Self {
        StoreRepr {
            is_loading: store.is_loading(),
            items: store.items,
            item_order: store.item_order,
            active_sides: store.active_sides,
            images: store.images,
            is_loading_fetch_cards: store.is_loading_fetch_cards,
            is_loading_fetch_card: store.is_loading_fetch_card,
            error: store.error,
            next: store.next,
        }
    }
}

impl Store {
    /// The initial state: no cards, nothing loading, no error, no cursor.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Selectors ---------------------------------------------------------

    pub fn items(&self) -> &HashMap<String, CardEntity> {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&CardEntity> {
        self.items.get(id)
    }

    pub fn item_order(&self) -> &[String] {
        &self.item_order
    }

    /// Cards in first-seen order.
    pub fn cards(&self) -> impl Iterator<Item = &CardEntity> + '_ {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn len(&self) -> usize {
        self.item_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_order.is_empty()
    }

    pub fn active_sides(&self) -> &HashMap<String, Side> {
        &self.active_sides
    }

    /// The side currently shown for a card; [`Side::A`] if never flipped.
    pub fn active_side(&self, id: &str) -> Side {
        self.active_sides.get(id).copied().unwrap_or_default()
    }

    pub fn images(&self) -> &HashMap<String, CardImages> {
        &self.images
    }

    pub fn image(&self, id: &str, side: Side) -> Option<&ImageState> {
        self.images.get(id).map(|images| images.side(side))
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading_fetch_cards || self.is_loading_fetch_card
    }

    pub fn is_loading_fetch_cards(&self) -> bool {
        self.is_loading_fetch_cards
    }

    pub fn is_loading_fetch_card(&self) -> bool {
        self.is_loading_fetch_card
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    // -- Transitions used by the reducer -----------------------------------

    pub(crate) fn set_loading_fetch_cards(&mut self, loading: bool) {
        self.is_loading_fetch_cards = loading;
    }

    pub(crate) fn set_loading_fetch_card(&mut self, loading: bool) {
        self.is_loading_fetch_card = loading;
    }

    pub(crate) fn set_error(&mut self, error: FetchError) {
        self.error = Some(error);
    }

    pub(crate) fn set_next(&mut self, next: Option<String>) {
        self.next = next;
    }

    /// Insert a new card at the end of the order, or merge into the
    /// existing one in place.
    pub(crate) fn upsert(&mut self, card: CardEntity) {
        match self.items.entry(card.id.clone()) {
            Entry::Occupied(mut existing) => existing.get_mut().merge(card),
            Entry::Vacant(slot) => {
                self.item_order.push(card.id.clone());
                slot.insert(card);
            }
        }
    }

    pub(crate) fn flip(&mut self, id: &str) {
        let flipped = self.active_side(id).flipped();
        self.active_sides.insert(id.to_string(), flipped);
    }

    /// Image state for one side, created as not-loading if absent.
    pub(crate) fn image_mut(&mut self, id: &str, side: Side) -> &mut ImageState {
        self.images.entry(id.to_string()).or_default().side_mut(side)
    }

    // -- Repair ------------------------------------------------------------

    /// Make `item_order` and `items` agree for a store decoded from outside
    /// the reducer.
    ///
    /// An ordered id with no card keeps its place and gets a bare card, so a
    /// later fetch merges into it instead of appending a second entry.
    /// Duplicates are dropped and cards missing from the order are appended
    /// in id order. Returns the number of entries that had to change.
    fn repair_order(&mut self) -> usize {
        let mut repaired = 0;
        let mut seen = HashSet::with_capacity(self.item_order.len());
        self.item_order.retain(|id| {
            let keep = seen.insert(id.clone());
            if !keep {
                repaired += 1;
            }
            keep
        });

        for id in &self.item_order {
            if !self.items.contains_key(id) {
                self.items.insert(id.clone(), CardEntity::new(id.as_str()));
                repaired += 1;
            }
        }

        let mut missing: Vec<String> = self
            .items
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        missing.sort();
        repaired += missing.len();
        self.item_order.extend(missing);

        for (id, card) in self.items.iter_mut() {
            if card.id != *id {
                card.id = id.clone();
            }
        }
        repaired
    }

    /// Clear every in-flight flag, store and image alike.
    pub(crate) fn clear_in_flight(&mut self) {
        self.set_loading_fetch_cards(false);
        self.set_loading_fetch_card(false);
        for images in self.images.values_mut() {
            images.a.is_loading = false;
            images.b.is_loading = false;
        }
    }
}
