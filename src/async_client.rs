//! Async wrapper around [`CardStore`] for use in async runtimes (Tokio, etc.).
//!
//! Source calls run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`]. The store lock is held only while an
//! action is dispatched, never across a source call, so a list fetch, a
//! single-card fetch and image fetches can all be in flight at once. Each
//! completion is folded into the shared store in whatever order it arrives.
//!
//! # Example
//!
//! ```no_run
//! use flashcards_sdk::{AsyncCardStore, CardSource, CardStore};
//!
//! async fn refresh<S: CardSource + Send + Sync + 'static>(source: S) -> flashcards_sdk::Result<()> {
//!     let store = AsyncCardStore::new(CardStore::new(), source);
//!     let list = tokio::spawn({
//!         let store = store.clone();
//!         async move { store.load_cards(None).await }
//!     });
//!     store.load_card("card-1").await?;
//!     list.await.map_err(|e| flashcards_sdk::FlashcardsError::Join(e.to_string()))??;
//!     Ok(())
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use crate::action::Action;
use crate::error::{FetchError, FlashcardsError, Result};
use crate::models::{CardEntity, Side};
use crate::source::{CardSource, QueryCacheState};
use crate::store::Store;
use crate::CardStore;

// ---------------------------------------------------------------------------
// AsyncCardStore
// ---------------------------------------------------------------------------

/// Cloneable async handle to a shared [`CardStore`] and its [`CardSource`].
///
/// Clones share the same store. Returned errors are infrastructure failures
/// (poisoned lock, panicked task); fetch failures are recorded in the store
/// as usual.
pub struct AsyncCardStore {
    inner: Arc<Mutex<CardStore>>,
    source: Arc<dyn CardSource + Send + Sync>,
}

impl Clone for AsyncCardStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            source: Arc::clone(&self.source),
        }
    }
}

impl AsyncCardStore {
    pub fn new<S>(store: CardStore, source: S) -> Self
    where
        S: CardSource + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(store)),
            source: Arc::new(source),
        }
    }

    /// A copy of the current store.
    pub fn state(&self) -> Result<Store> {
        Ok(self.lock()?.state().clone())
    }

    pub fn query_cache(&self) -> Result<QueryCacheState> {
        Ok(self.lock()?.query_cache())
    }

    pub fn dispatch(&self, action: &Action) -> Result<()> {
        self.lock()?.dispatch(action);
        Ok(())
    }

    /// Fetch one page of cards. Overlaps freely with other fetches.
    pub async fn load_cards(&self, cursor: Option<String>) -> Result<QueryCacheState> {
        self.dispatch(&Action::FetchCards)?;
        let source = Arc::clone(&self.source);
        let outcome = self
            .blocking(move || source.list_cards(cursor.as_deref()))
            .await?;

        let mut store = self.lock()?;
        match outcome {
            Ok(page) => {
                log::info!("Fetched {} cards", page.items.len());
                store.list_cache.record_page();
                store.dispatch(&Action::FetchCardsResponse(page));
            }
            Err(e) => {
                log::warn!("Failed to fetch cards: {}", e);
                store.dispatch(&Action::FetchCardsError(e));
            }
        }
        Ok(store.query_cache())
    }

    /// Fetch a single card. Returns the merged card, or `None` if the fetch
    /// failed.
    pub async fn load_card(&self, id: &str) -> Result<Option<CardEntity>> {
        self.dispatch(&Action::FetchCard)?;
        let source = Arc::clone(&self.source);
        let card_id = id.to_string();
        let outcome = self.blocking(move || source.get_card(&card_id)).await?;

        let mut store = self.lock()?;
        match outcome {
            Ok(card) => {
                let merged_id = card.id.clone();
                store.dispatch(&Action::FetchCardResponse(card));
                Ok(store.state().item(&merged_id).cloned())
            }
            Err(e) => {
                log::warn!("Failed to fetch card {}: {}", id, e);
                store.dispatch(&Action::FetchCardError(e));
                Ok(None)
            }
        }
    }

    /// Resolve one side's image. Returns the source on success.
    pub async fn load_image(&self, id: &str, side: Side) -> Result<Option<String>> {
        self.dispatch(&Action::fetch_image(id, side))?;
        let source = Arc::clone(&self.source);
        let card_id = id.to_string();
        let outcome = self
            .blocking(move || source.get_image(&card_id, side))
            .await?;

        let mut store = self.lock()?;
        match outcome {
            Ok(src) => {
                store.dispatch(&Action::fetch_image_response(id, side, src.clone()));
                Ok(Some(src))
            }
            Err(e) => {
                log::warn!("Failed to fetch image {}/{}: {}", id, side, e);
                store.dispatch(&Action::fetch_image_error(id, side, e));
                Ok(None)
            }
        }
    }

    /// Take back the inner store once no other handle is alive.
    pub fn into_inner(self) -> Result<CardStore> {
        let inner = Arc::try_unwrap(self.inner).map_err(|_| {
            FlashcardsError::InvalidArgument("store still shared by another handle".into())
        })?;
        inner
            .into_inner()
            .map_err(|_| FlashcardsError::InvalidArgument("store lock poisoned".into()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, CardStore>> {
        self.inner
            .lock()
            .map_err(|_| FlashcardsError::InvalidArgument("store lock poisoned".into()))
    }

    async fn blocking<F, T>(&self, f: F) -> Result<std::result::Result<T, FetchError>>
    where
        F: FnOnce() -> std::result::Result<T, FetchError> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(f)
            .await
            .map_err(|e| FlashcardsError::Join(e.to_string()))
    }
}
