use serde::{Deserialize, Serialize};

use crate::models::{CardEntity, Side};

// ---------------------------------------------------------------------------
// CardDraft: the output of the card create/edit form
// ---------------------------------------------------------------------------

/// A card being created or edited, before it is saved.
///
/// `id` is `None` for a new card. Image fields hold the uploaded
/// attachment's name or URL; clearing an attachment sets them back to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub side_a_text: Option<String>,
    pub side_a_image_url: Option<String>,
    pub side_b_text: Option<String>,
    pub side_b_image_url: Option<String>,
}

impl CardDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill a draft from a cached card, as the edit form does.
    pub fn from_card(card: &CardEntity) -> Self {
        Self {
            id: Some(card.id.clone()),
            labels: card.labels().into_iter().map(str::to_string).collect(),
            side_a_text: card.text(Side::A).map(str::to_string),
            side_a_image_url: card.image_url(Side::A).map(str::to_string),
            side_b_text: card.text(Side::B).map(str::to_string),
            side_b_image_url: card.image_url(Side::B).map(str::to_string),
        }
    }

    /// Replace the labels from the form's single free-text input.
    pub fn set_labels_input(&mut self, input: &str) {
        self.labels = parse_labels(input);
    }

    pub fn set_text(&mut self, side: Side, text: impl Into<String>) {
        *self.text_mut(side) = Some(text.into());
    }

    /// Attach (`Some`) or remove (`None`) a side's image.
    pub fn set_image(&mut self, side: Side, image: Option<String>) {
        match side {
            Side::A => self.side_a_image_url = image,
            Side::B => self.side_b_image_url = image,
        }
    }

    pub fn text(&self, side: Side) -> Option<&str> {
        match side {
            Side::A => self.side_a_text.as_deref(),
            Side::B => self.side_b_text.as_deref(),
        }
    }

    pub fn image(&self, side: Side) -> Option<&str> {
        match side {
            Side::A => self.side_a_image_url.as_deref(),
            Side::B => self.side_b_image_url.as_deref(),
        }
    }

    /// True when neither side has text or an image.
    pub fn is_blank(&self) -> bool {
        Side::ALL.iter().all(|&side| {
            self.text(side).map_or(true, |t| t.trim().is_empty()) && self.image(side).is_none()
        })
    }

    fn text_mut(&mut self, side: Side) -> &mut Option<String> {
        match side {
            Side::A => &mut self.side_a_text,
            Side::B => &mut self.side_b_text,
        }
    }
}

/// Split a whitespace-separated label string, dropping empty entries.
pub fn parse_labels(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}
