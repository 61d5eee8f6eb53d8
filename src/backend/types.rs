//! Wire and display types for search results

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_MEDIA: &str = "Unknown Media";

/// Namespace for record ids (UUIDv5)
const RECORD_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_93b7_5d08_a1e2_4c77_0b9d_3e51);

/// Top-level search response
#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    pub results: Vec<MediaItem>,
}

/// One item as the endpoint sends it. Every field may be absent or null.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(default)]
    pub track_id: Option<u64>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub artwork_url100: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// List key for a record, derived from its content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Derive an id from a content key. `occurrence` separates repeats of
    /// the same key within one result set.
    ///
    /// The key is length-prefixed so no (key, occurrence) pair can encode
    /// the same bytes as another.
    pub fn derive(key: &str, occurrence: usize) -> Self {
        let mut name = Vec::with_capacity(key.len() + 16);
        name.extend_from_slice(&(key.len() as u64).to_le_bytes());
        name.extend_from_slice(key.as_bytes());
        name.extend_from_slice(&(occurrence as u64).to_le_bytes());
        Self(Uuid::new_v5(&RECORD_NAMESPACE, &name))
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A decoded media item, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub id: RecordId,
    pub title: String,
    pub artist: String,
    pub media_kind: String,
    pub artwork: Option<Url>,
    pub preview: Option<Url>,
}

impl ResultRecord {
    /// Content key the id is derived from: the server's track id when
    /// present, otherwise title, artist and preview link.
    pub fn content_key(item: &MediaItem, title: &str, artist: &str, preview: Option<&Url>) -> String {
        match item.track_id {
            Some(track_id) => format!("track:{}", track_id),
            None => format!(
                "item:{}\u{1f}{}\u{1f}{}",
                title,
                artist,
                preview.map(Url::as_str).unwrap_or_default()
            ),
        }
    }
}

/// Parse an optional locator. Empty or malformed strings yield `None`.
pub fn parse_locator(raw: Option<&str>) -> Option<Url> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Ignoring malformed locator {:?}: {}", raw, e);
            None
        }
    }
}

pub type ResultSet = Vec<ResultRecord>;
