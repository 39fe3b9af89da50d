//! GraphQL documents, request builders and response decoders.
//!
//! Transport is left to the caller: a [`GraphqlRequest`] serializes to the
//! standard `{"query", "variables"}` POST body, and the `parse_*` functions
//! take the decoded JSON response body.
//!
//! # Example
//!
//! ```rust
//! use flashcards_sdk::graphql;
//! use serde_json::json;
//!
//! let request = graphql::list_cards(None);
//! assert!(request.query.contains("cards"));
//!
//! let body = json!({"data": {"me": {"cards": {"items": [{"id": "1"}], "next": "n1"}}}});
//! let page = graphql::parse_cards_response(&body).unwrap();
//! assert_eq!(page.next.as_deref(), Some("n1"));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{FlashcardsError, Result};
use crate::models::{CardDraft, CardEntity, CardPage};

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

pub const LIST_CARDS: &str = r#"query listCards($next: String) {
  me {
    cards(next: $next) {
      items {
        id
        labels
        sideAFontSize
        sideAText
        sideAImageUrl
        sideBFontSize
        sideBText
        sideBImageUrl
        lastTestTime
      }
      next
    }
  }
}"#;

pub const FETCH_CARD: &str = r#"query fetchCard($id: String!) {
  me {
    card(id: $id) {
      id
      labels
      sideAFontSize
      sideAText
      sideAImageUrl
      sideBFontSize
      sideBText
      sideBImageUrl
      lastTestTime
    }
  }
}"#;

pub const SAVE_CARD: &str = r#"mutation upsertCard(
  $id: String
  $userId: String!
  $labels: [String]
  $sideAText: String
  $sideAImageUrl: String
  $sideBText: String
  $sideBImageUrl: String
) {
  upsertCard(
    id: $id
    userId: $userId
    labels: $labels
    sideAText: $sideAText
    sideAImageUrl: $sideAImageUrl
    sideBText: $sideBText
    sideBImageUrl: $sideBImageUrl
  ) {
    id
    labels
    sideAFontSize
    sideAText
    sideAImageUrl
    sideBFontSize
    sideBText
    sideBImageUrl
    lastTestTime
  }
}"#;

// ---------------------------------------------------------------------------
// GraphqlRequest
// ---------------------------------------------------------------------------

/// A GraphQL operation ready to be POSTed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl GraphqlRequest {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            variables: Map::new(),
        }
    }

    /// Set a variable. `Value::Null` is skipped so optional variables stay absent.
    pub fn variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.variables.insert(name.to_string(), value);
        }
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Request one page of cards, starting after `cursor` when given.
pub fn list_cards(cursor: Option<&str>) -> GraphqlRequest {
    GraphqlRequest::new(LIST_CARDS).variable("next", cursor)
}

pub fn fetch_card(id: &str) -> Result<GraphqlRequest> {
    if id.trim().is_empty() {
        return Err(FlashcardsError::InvalidArgument(
            "card id must not be empty".to_string(),
        ));
    }
    Ok(GraphqlRequest::new(FETCH_CARD).variable("id", id))
}

/// Build the `upsertCard` mutation for a draft on behalf of `user_id`.
///
/// `user_id` is the signed-in user's subject claim; resolving it is the
/// caller's job.
pub fn save_card(user_id: &str, draft: &CardDraft) -> Result<GraphqlRequest> {
    if user_id.trim().is_empty() {
        return Err(FlashcardsError::InvalidArgument(
            "user id must not be empty".to_string(),
        ));
    }
    if draft.is_blank() {
        return Err(FlashcardsError::InvalidArgument(
            "card has no text or image on either side".to_string(),
        ));
    }

    let mut request = GraphqlRequest::new(SAVE_CARD).variable("userId", user_id);
    if let Value::Object(fields) = serde_json::to_value(draft)? {
        for (name, value) in fields {
            request = request.variable(&name, value);
        }
    }
    Ok(request)
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

/// Decode the `listCards` response body into a page.
pub fn parse_cards_response(response: &Value) -> Result<CardPage> {
    let cards = lookup(response, "/data/me/cards")?;
    if cards.is_null() {
        return Ok(CardPage::default());
    }
    Ok(CardPage::deserialize(cards)?)
}

/// Decode the `fetchCard` response body. A `null` card is `NotFound`.
pub fn parse_card_response(response: &Value) -> Result<CardEntity> {
    let card = lookup(response, "/data/me/card")?;
    if card.is_null() {
        return Err(FlashcardsError::NotFound("card".to_string()));
    }
    Ok(CardEntity::deserialize(card)?)
}

/// Decode the `upsertCard` mutation response body.
pub fn parse_saved_card(response: &Value) -> Result<CardEntity> {
    let card = lookup(response, "/data/upsertCard")?;
    if card.is_null() {
        return Err(FlashcardsError::InvalidResponse(
            "upsertCard returned null".to_string(),
        ));
    }
    Ok(CardEntity::deserialize(card)?)
}

/// Accept a list payload either as a bare page or as a full response body.
pub fn page_from_payload(payload: Value) -> Result<CardPage> {
    if is_response_body(&payload) {
        return parse_cards_response(&payload);
    }
    Ok(serde_json::from_value(payload)?)
}

/// Accept a single-card payload as a full response body, as `{"card": ...}`,
/// or as the card fields directly.
pub fn card_from_payload(mut payload: Value) -> Result<CardEntity> {
    if is_response_body(&payload) {
        return parse_card_response(&payload);
    }
    if payload.get("id").is_none() {
        if let Some(card) = payload.get_mut("card").filter(|c| c.is_object()) {
            return Ok(serde_json::from_value(card.take())?);
        }
    }
    Ok(serde_json::from_value(payload)?)
}

pub(crate) fn deserialize_page_payload<'de, D>(deserializer: D) -> std::result::Result<CardPage, D::Error>
where
    D: Deserializer<'de>,
{
    let payload = Value::deserialize(deserializer)?;
    page_from_payload(payload).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_card_payload<'de, D>(deserializer: D) -> std::result::Result<CardEntity, D::Error>
where
    D: Deserializer<'de>,
{
    let payload = Value::deserialize(deserializer)?;
    card_from_payload(payload).map_err(serde::de::Error::custom)
}

/// A response body has no top-level `id` and either a `data.me` object or
/// an `errors` array. Card fields named `data` or `errors` do not qualify.
fn is_response_body(payload: &Value) -> bool {
    if payload.get("id").is_some() {
        return false;
    }
    payload.pointer("/data/me").is_some_and(Value::is_object)
        || payload.get("errors").is_some_and(Value::is_array)
}

/// Surface GraphQL `errors`, then resolve a JSON pointer under the body.
fn lookup<'a>(response: &'a Value, pointer: &str) -> Result<&'a Value> {
    if let Some(errors) = response.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string())
                })
                .collect();
            return Err(FlashcardsError::Graphql(messages.join("; ")));
        }
    }
    response
        .pointer(pointer)
        .ok_or_else(|| FlashcardsError::InvalidResponse(format!("missing {}", pointer)))
}
