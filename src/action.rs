//! Actions folded by the card reducer.
//!
//! Actions serialize in the Redux shape `{"type": "cards/<name>", "payload": ...}`
//! so they can be logged, replayed or received from another process. An
//! action whose `type` is not recognized decodes to [`Action::Unknown`],
//! which the reducer treats as a no-op.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FetchError, Result};
use crate::graphql;
use crate::models::{CardEntity, CardPage, Side};

// ---------------------------------------------------------------------------
// Image payloads
// ---------------------------------------------------------------------------

/// Addresses one side of one card's image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub id: String,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFailure {
    pub id: String,
    pub side: Side,
    pub error: FetchError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageLoaded {
    pub id: String,
    pub side: Side,
    pub source: String,
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

const KNOWN_TYPES: &[&str] = &[
    "cards/fetchCards",
    "cards/fetchCardsResponse",
    "cards/fetchCardsError",
    "cards/fetchCard",
    "cards/fetchCardResponse",
    "cards/fetchCardError",
    "cards/flipCard",
    "cards/fetchImage",
    "cards/fetchImageError",
    "cards/fetchImageResponse",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "cards/fetchCards")]
    FetchCards,
    #[serde(rename = "cards/fetchCardsResponse")]
    FetchCardsResponse(#[serde(deserialize_with = "graphql::deserialize_page_payload")] CardPage),
    #[serde(rename = "cards/fetchCardsError")]
    FetchCardsError(FetchError),

    #[serde(rename = "cards/fetchCard")]
    FetchCard,
    #[serde(rename = "cards/fetchCardResponse")]
    FetchCardResponse(#[serde(deserialize_with = "graphql::deserialize_card_payload")] CardEntity),
    #[serde(rename = "cards/fetchCardError")]
    FetchCardError(FetchError),

    #[serde(rename = "cards/flipCard")]
    FlipCard(String),

    #[serde(rename = "cards/fetchImage")]
    FetchImage(ImageRequest),
    #[serde(rename = "cards/fetchImageError")]
    FetchImageError(ImageFailure),
    #[serde(rename = "cards/fetchImageResponse")]
    FetchImageResponse(ImageLoaded),

    /// Any action type this slice does not handle.
    #[serde(other, rename = "unknown")]
    Unknown,
}

impl Action {
    pub fn fetch_cards() -> Self {
        Action::FetchCards
    }

    pub fn fetch_cards_response(page: CardPage) -> Self {
        Action::FetchCardsResponse(page)
    }

    pub fn fetch_cards_error(error: impl Into<FetchError>) -> Self {
        Action::FetchCardsError(error.into())
    }

    pub fn fetch_card() -> Self {
        Action::FetchCard
    }

    pub fn fetch_card_response(card: CardEntity) -> Self {
        Action::FetchCardResponse(card)
    }

    pub fn fetch_card_error(error: impl Into<FetchError>) -> Self {
        Action::FetchCardError(error.into())
    }

    pub fn flip_card(id: impl Into<String>) -> Self {
        Action::FlipCard(id.into())
    }

    pub fn fetch_image(id: impl Into<String>, side: Side) -> Self {
        Action::FetchImage(ImageRequest { id: id.into(), side })
    }

    pub fn fetch_image_error(id: impl Into<String>, side: Side, error: impl Into<FetchError>) -> Self {
        Action::FetchImageError(ImageFailure {
            id: id.into(),
            side,
            error: error.into(),
        })
    }

    pub fn fetch_image_response(id: impl Into<String>, side: Side, source: impl Into<String>) -> Self {
        Action::FetchImageResponse(ImageLoaded {
            id: id.into(),
            side,
            source: source.into(),
        })
    }

    /// Decode an action from its JSON form.
    ///
    /// Unlike plain deserialization, an unrecognized `type` decodes to
    /// [`Action::Unknown`] whatever its payload looks like.
    pub fn from_value(value: Value) -> Result<Self> {
        let known = value
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|t| KNOWN_TYPES.contains(&t));
        if !known {
            return Ok(Action::Unknown);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The wire `type` of this action, e.g. `"cards/flipCard"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::FetchCards => "cards/fetchCards",
            Action::FetchCardsResponse(_) => "cards/fetchCardsResponse",
            Action::FetchCardsError(_) => "cards/fetchCardsError",
            Action::FetchCard => "cards/fetchCard",
            Action::FetchCardResponse(_) => "cards/fetchCardResponse",
            Action::FetchCardError(_) => "cards/fetchCardError",
            Action::FlipCard(_) => "cards/flipCard",
            Action::FetchImage(_) => "cards/fetchImage",
            Action::FetchImageError(_) => "cards/fetchImageError",
            Action::FetchImageResponse(_) => "cards/fetchImageResponse",
            Action::Unknown => "unknown",
        }
    }
}
