use std::path::PathBuf;

/// File name used for store snapshots inside the cache directory.
pub const SNAPSHOT_FILE: &str = "cards-snapshot.json";

/// Format version written into every snapshot. Snapshots with another
/// version are discarded on load.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Card fields requested by every card-returning query.
pub const CARD_FIELDS: &[&str] = &[
    "id",
    "labels",
    "sideAFontSize",
    "sideAText",
    "sideAImageUrl",
    "sideBFontSize",
    "sideBText",
    "sideBImageUrl",
    "lastTestTime",
];

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("flashcards-sdk")
    } else {
        PathBuf::from(".flashcards-sdk-cache")
    }
}

pub fn default_snapshot_path() -> PathBuf {
    default_cache_dir().join(SNAPSHOT_FILE)
}
