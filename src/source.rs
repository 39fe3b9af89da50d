//! The data-source seam between the store and whatever talks to the server.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::models::{CardEntity, CardPage, Side};

/// Supplies card data to a [`CardStore`](crate::CardStore).
///
/// Implementations typically send the requests built in
/// [`graphql`](crate::graphql) and decode the responses with its `parse_*`
/// functions. Failures are returned as [`FetchError`] values, which the
/// store records rather than propagates.
pub trait CardSource {
    /// Fetch one page of cards, starting after `cursor` when given.
    fn list_cards(&self, cursor: Option<&str>) -> Result<CardPage, FetchError>;

    fn get_card(&self, id: &str) -> Result<CardEntity, FetchError>;

    /// Resolve a displayable source (URL or data URI) for a side's image.
    fn get_image(&self, id: &str, side: Side) -> Result<String, FetchError>;
}

impl<S: CardSource + ?Sized> CardSource for &S {
    fn list_cards(&self, cursor: Option<&str>) -> Result<CardPage, FetchError> {
        (**self).list_cards(cursor)
    }

    fn get_card(&self, id: &str) -> Result<CardEntity, FetchError> {
        (**self).get_card(id)
    }

    fn get_image(&self, id: &str, side: Side) -> Result<String, FetchError> {
        (**self).get_image(id, side)
    }
}

/// Whether the card list query has produced data yet.
///
/// Owned by the store facade and handed back from each list fetch, so
/// views can decide between showing a placeholder and the cached list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCacheState {
    /// True once any list fetch has completed successfully.
    pub has_cache: bool,
    /// Number of list pages received.
    pub pages: usize,
}

impl QueryCacheState {
    pub(crate) fn record_page(&mut self) {
        self.has_cache = true;
        self.pages += 1;
    }
}
