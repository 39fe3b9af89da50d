//! The card reducer: a pure fold of [`Action`]s into a [`Store`].
//!
//! # Example
//!
//! ```rust
//! use flashcards_sdk::{reduce, Action, CardEntity, CardPage, Store};
//!
//! let page = CardPage::new(vec![CardEntity::new("1")], Some("n1".into()));
//! let state = reduce(Store::new(), &Action::fetch_cards_response(page));
//! assert_eq!(state.item_order(), ["1"]);
//! assert_eq!(state.next(), Some("n1"));
//! ```

use crate::action::Action;
use crate::store::Store;

/// Apply one action to a store and return the next store.
///
/// Takes the previous store by value: the caller hands over its copy and
/// keeps the returned one. The function performs no I/O and never fails;
/// error payloads are recorded as data. [`Action::Unknown`] returns the
/// store unchanged.
pub fn reduce(mut state: Store, action: &Action) -> Store {
    match action {
        Action::FetchCards => state.set_loading_fetch_cards(true),
        Action::FetchCardsResponse(page) => {
            state.set_loading_fetch_cards(false);
            for card in &page.items {
                state.upsert(card.clone());
            }
            // No cursor means no further page, not "keep the old cursor".
            state.set_next(page.next.clone());
        }
        Action::FetchCardsError(error) => {
            state.set_loading_fetch_cards(false);
            state.set_error(error.clone());
        }

        Action::FetchCard => state.set_loading_fetch_card(true),
        Action::FetchCardResponse(card) => {
            state.set_loading_fetch_card(false);
            state.upsert(card.clone());
        }
        Action::FetchCardError(error) => {
            state.set_loading_fetch_card(false);
            state.set_error(error.clone());
        }

        Action::FlipCard(id) => state.flip(id),

        Action::FetchImage(req) => {
            state.image_mut(&req.id, req.side).is_loading = true;
        }
        Action::FetchImageError(failure) => {
            let image = state.image_mut(&failure.id, failure.side);
            image.is_loading = false;
            image.error = Some(failure.error.clone());
        }
        Action::FetchImageResponse(loaded) => {
            let image = state.image_mut(&loaded.id, loaded.side);
            image.is_loading = false;
            image.source = Some(loaded.source.clone());
            image.error = None;
        }

        Action::Unknown => {}
    }
    state
}

/// Fold a sequence of actions, starting from `state`.
pub fn reduce_all<'a, I>(state: Store, actions: I) -> Store
where
    I: IntoIterator<Item = &'a Action>,
{
    actions.into_iter().fold(state, reduce)
}
