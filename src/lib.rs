//! Flashcards SDK for Rust.
//!
//! Client-side state for a flashcard application: a normalized cache of
//! cards and card-side images, folded by a pure reducer from discrete
//! actions, plus the GraphQL documents and decoders that feed it.
//!
//! # Quick start
//!
//! ```rust
//! use flashcards_sdk::{CardEntity, CardPage, CardSource, CardStore, FetchError, Side};
//!
//! struct Fixed;
//!
//! impl CardSource for Fixed {
//!     fn list_cards(&self, _cursor: Option<&str>) -> Result<CardPage, FetchError> {
//!         Ok(CardPage::new(vec![CardEntity::new("1").with("sideAText", "hola")], None))
//!     }
//!     fn get_card(&self, id: &str) -> Result<CardEntity, FetchError> {
//!         Ok(CardEntity::new(id))
//!     }
//!     fn get_image(&self, id: &str, side: Side) -> Result<String, FetchError> {
//!         Ok(format!("https://img.example/{}/{}", id, side))
//!     }
//! }
//!
//! let mut store = CardStore::new();
//! let cache = store.load_cards(&Fixed, None);
//! assert!(cache.has_cache);
//!
//! store.flip_card("1");
//! assert_eq!(store.state().active_side("1"), Side::B);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod action;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod reducer;
pub mod snapshot;
pub mod source;
pub mod store;

pub use action::Action;
#[cfg(feature = "async")]
pub use async_client::AsyncCardStore;
pub use error::{FetchError, FlashcardsError, Result};
pub use models::{CardDraft, CardEntity, CardImages, CardPage, ImageState, Side};
pub use reducer::{reduce, reduce_all};
pub use source::{CardSource, QueryCacheState};
pub use store::Store;

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// CardStoreBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CardStore`].
///
/// Use [`CardStore::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CardStoreBuilder::build).
#[derive(Default)]
pub struct CardStoreBuilder {
    snapshot_path: Option<PathBuf>,
    restore: bool,
    persist_on_dispatch: bool,
    initial: Option<Store>,
}

impl CardStoreBuilder {
    /// Keep snapshots in `dir` under the default file name.
    pub fn cache_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.snapshot_path = Some(dir.as_ref().join(config::SNAPSHOT_FILE));
        self
    }

    /// Use an explicit snapshot file path.
    pub fn snapshot_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.snapshot_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep snapshots in the platform cache directory
    /// (e.g. `~/.cache/flashcards-sdk` on Linux).
    pub fn default_cache_dir(mut self) -> Self {
        self.snapshot_path = Some(config::default_snapshot_path());
        self
    }

    /// Load the snapshot (if any) when building. Defaults to `false`.
    pub fn restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    /// Save a snapshot after every dispatched action. Defaults to `false`.
    ///
    /// A failed save is logged and does not undo the transition.
    pub fn persist_on_dispatch(mut self, persist: bool) -> Self {
        self.persist_on_dispatch = persist;
        self
    }

    /// Start from `state` instead of the empty store. A restored snapshot
    /// takes precedence.
    pub fn initial_state(mut self, state: Store) -> Self {
        self.initial = Some(state);
        self
    }

    /// Build the store.
    ///
    /// Fails if restoring or persisting on dispatch was requested without a
    /// snapshot location, or if the snapshot exists but cannot be read.
    pub fn build(self) -> Result<CardStore> {
        if self.persist_on_dispatch && self.snapshot_path.is_none() {
            return Err(FlashcardsError::InvalidArgument(
                "persist_on_dispatch requires a snapshot path".to_string(),
            ));
        }
        let mut store = CardStore {
            state: self.initial.unwrap_or_default(),
            list_cache: QueryCacheState::default(),
            snapshot_path: self.snapshot_path,
            persist_on_dispatch: self.persist_on_dispatch,
        };
        if self.restore {
            store.restore()?;
        }
        Ok(store)
    }
}

// ---------------------------------------------------------------------------
// CardStore
// ---------------------------------------------------------------------------

/// Owner of the one authoritative [`Store`].
///
/// Every change goes through [`dispatch`](Self::dispatch), which replaces the
/// store with the reducer's output. The `load_*` methods drive a
/// [`CardSource`] and dispatch the start, response and error actions around
/// each call.
pub struct CardStore {
    state: Store,
    list_cache: QueryCacheState,
    snapshot_path: Option<PathBuf>,
    persist_on_dispatch: bool,
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CardStore {
    /// An in-memory store with no snapshot location.
    pub fn new() -> Self {
        Self {
            state: Store::new(),
            list_cache: QueryCacheState::default(),
            snapshot_path: None,
            persist_on_dispatch: false,
        }
    }

    /// Create a new builder for configuring the store.
    pub fn builder() -> CardStoreBuilder {
        CardStoreBuilder::default()
    }

    pub fn state(&self) -> &Store {
        &self.state
    }

    pub fn into_state(self) -> Store {
        self.state
    }

    /// Cache state of the card list query.
    pub fn query_cache(&self) -> QueryCacheState {
        self.list_cache
    }

    // -- Dispatch ------------------------------------------------------------

    /// Fold one action into the store, then save a snapshot if the store
    /// was built with [`persist_on_dispatch`](CardStoreBuilder::persist_on_dispatch).
    pub fn dispatch(&mut self, action: &Action) -> &Store {
        log::debug!("dispatch {}", action.type_name());
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        if self.persist_on_dispatch {
            if let Some(path) = self.snapshot_path.as_deref() {
                if let Err(e) = snapshot::save_snapshot(&self.state, path) {
                    log::warn!("Failed to save snapshot after {}: {}", action.type_name(), e);
                }
            }
        }
        &self.state
    }

    /// Decode a JSON action (see [`Action::from_value`]) and dispatch it.
    pub fn dispatch_json(&mut self, value: serde_json::Value) -> Result<&Store> {
        let action = Action::from_value(value)?;
        Ok(self.dispatch(&action))
    }

    /// Flip a card and return the side now shown.
    pub fn flip_card(&mut self, id: &str) -> Side {
        self.dispatch(&Action::flip_card(id)).active_side(id)
    }

    // -- Fetching ------------------------------------------------------------

    /// Fetch one page of cards through `source`.
    ///
    /// Failures are recorded in the store's `error`; the returned
    /// [`QueryCacheState`] tells whether the list has ever loaded.
    pub fn load_cards<S: CardSource + ?Sized>(
        &mut self,
        source: &S,
        cursor: Option<&str>,
    ) -> QueryCacheState {
        self.dispatch(&Action::FetchCards);
        match source.list_cards(cursor) {
            Ok(page) => {
                log::info!(
                    "Fetched {} cards (more pages: {})",
                    page.items.len(),
                    page.next.is_some()
                );
                self.list_cache.record_page();
                self.dispatch(&Action::FetchCardsResponse(page));
            }
            Err(e) => {
                log::warn!("Failed to fetch cards: {}", e);
                self.dispatch(&Action::FetchCardsError(e));
            }
        }
        self.list_cache
    }

    /// Fetch the page after the stored cursor.
    ///
    /// Returns `false` without fetching when there is no further page.
    pub fn load_next_page<S: CardSource + ?Sized>(&mut self, source: &S) -> bool {
        let Some(cursor) = self.state.next().map(str::to_string) else {
            return false;
        };
        self.load_cards(source, Some(&cursor));
        true
    }

    /// Fetch a single card through `source`. Returns the merged card, or
    /// `None` if the fetch failed.
    pub fn load_card<S: CardSource + ?Sized>(&mut self, source: &S, id: &str) -> Option<&CardEntity> {
        self.dispatch(&Action::FetchCard);
        match source.get_card(id) {
            Ok(card) => {
                let card_id = card.id.clone();
                self.dispatch(&Action::FetchCardResponse(card));
                self.state.item(&card_id)
            }
            Err(e) => {
                log::warn!("Failed to fetch card {}: {}", id, e);
                self.dispatch(&Action::FetchCardError(e));
                None
            }
        }
    }

    /// Resolve one side's image through `source` and return its state.
    pub fn load_image<S: CardSource + ?Sized>(
        &mut self,
        source: &S,
        id: &str,
        side: Side,
    ) -> Option<&ImageState> {
        self.dispatch(&Action::fetch_image(id, side));
        let action = match source.get_image(id, side) {
            Ok(src) => Action::fetch_image_response(id, side, src),
            Err(e) => {
                log::warn!("Failed to fetch image {}/{}: {}", id, side, e);
                Action::fetch_image_error(id, side, e)
            }
        };
        self.dispatch(&action).image(id, side)
    }

    // -- Snapshots -----------------------------------------------------------

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Save the current store to the configured snapshot path.
    pub fn persist(&self) -> Result<()> {
        let path = self.require_snapshot_path()?;
        snapshot::save_snapshot(&self.state, path)
    }

    /// Replace the store with the saved snapshot, if one exists.
    ///
    /// Returns `true` if a snapshot was loaded.
    pub fn restore(&mut self) -> Result<bool> {
        let path = self.require_snapshot_path()?;
        match snapshot::load_snapshot(path)? {
            Some(state) => {
                log::info!("Restored {} cards from {}", state.len(), path.display());
                self.state = state;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete the saved snapshot, if any.
    pub fn clear_snapshot(&self) -> Result<()> {
        let path = self.require_snapshot_path()?;
        snapshot::remove_snapshot(path)
    }

    fn require_snapshot_path(&self) -> Result<&Path> {
        self.snapshot_path.as_deref().ok_or_else(|| {
            FlashcardsError::InvalidArgument("no snapshot path configured".to_string())
        })
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CardStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CardStore(cards={}, loading={}, has_cache={}, snapshot={})",
            self.state.len(),
            self.state.is_loading(),
            self.list_cache.has_cache,
            self.snapshot_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        )
    }
}
