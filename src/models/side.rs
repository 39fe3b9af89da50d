use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlashcardsError;

// ---------------------------------------------------------------------------
// Side: one face of a flashcard
// ---------------------------------------------------------------------------

/// One of the two faces of a flashcard.
///
/// A card with no recorded active side shows [`Side::A`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// The opposite face.
    pub fn flipped(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::A => "A",
            Side::B => "B",
        }
    }

    /// Name of a per-side card field, e.g. `Side::B.field("Text")` is `"sideBText"`.
    pub fn field(self, suffix: &str) -> String {
        format!("side{}{}", self.as_str(), suffix)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = FlashcardsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Side::A),
            "B" | "b" => Ok(Side::B),
            other => Err(FlashcardsError::InvalidArgument(format!(
                "Unknown card side: {}",
                other
            ))),
        }
    }
}
