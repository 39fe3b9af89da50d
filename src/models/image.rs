use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::models::Side;

// ---------------------------------------------------------------------------
// ImageState: async state of one side's image
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageState {
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchError>,
}

// ---------------------------------------------------------------------------
// CardImages: both sides of one card
// ---------------------------------------------------------------------------

/// Image state for both faces of a card. The two sides are independent:
/// nothing written through [`side_mut`](Self::side_mut) for one side
/// touches the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardImages {
    #[serde(rename = "A", default)]
    pub a: ImageState,
    #[serde(rename = "B", default)]
    pub b: ImageState,
}

impl CardImages {
    pub fn side(&self, side: Side) -> &ImageState {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut ImageState {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }
}
