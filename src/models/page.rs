use serde::{Deserialize, Serialize};

use crate::models::CardEntity;

// ---------------------------------------------------------------------------
// CardPage: one page of a paginated card list
// ---------------------------------------------------------------------------

/// One page of the card list. `next` is the cursor for the following page;
/// `None` means this was the last one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardPage {
    #[serde(default)]
    pub items: Vec<CardEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl CardPage {
    pub fn new(items: Vec<CardEntity>, next: Option<String>) -> Self {
        Self { items, next }
    }
}
