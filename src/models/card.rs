use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Side;

// ---------------------------------------------------------------------------
// CardEntity: a cached card, a stable id plus open-ended server fields
// ---------------------------------------------------------------------------

/// A card as cached on the client.
///
/// Only `id` is structural. Every other attribute the server returns
/// (`labels`, `sideAText`, `sideBImageUrl`, ...) lives in `fields` and is
/// carried through untouched, so a newer schema never breaks the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardEntity {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CardEntity {
    /// Create a card with no fields besides its id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field. Setting `"id"` to a string renames the card; any other
    /// value for `"id"` is ignored.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if key == "id" {
            if let Value::String(id) = value {
                self.id = id;
            }
            return;
        }
        self.fields.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Shallow-merge a newer version of this card into `self`.
    ///
    /// Fields present in `newer` overwrite; fields only present in `self`
    /// survive. See [`merge_fields`].
    pub fn merge(&mut self, newer: CardEntity) {
        let older = std::mem::take(&mut self.fields);
        self.fields = merge_fields(older, newer.fields);
    }

    // -- Typed accessors ---------------------------------------------------

    /// Card labels. Non-string entries are skipped.
    pub fn labels(&self) -> Vec<&str> {
        match self.fields.get("labels") {
            Some(Value::Array(labels)) => labels.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn text(&self, side: Side) -> Option<&str> {
        self.str_field(&side.field("Text"))
    }

    pub fn image_url(&self, side: Side) -> Option<&str> {
        self.str_field(&side.field("ImageUrl"))
    }

    /// Font size for a side, accepting either a number or a numeric string.
    pub fn font_size(&self, side: Side) -> Option<f64> {
        match self.fields.get(&side.field("FontSize"))? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn last_test_time(&self) -> Option<&str> {
        self.str_field("lastTestTime")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Field-union merge: every key of `older` is kept unless `newer` carries
/// the same key, in which case the newer value wins. Values are replaced
/// whole, never merged recursively.
pub fn merge_fields(mut older: Map<String, Value>, newer: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in newer {
        older.insert(key, value);
    }
    older
}
