//! Response decoding
//!
//! Maps the raw JSON body onto [`ResultRecord`]s, substituting the
//! sentinel strings for absent text fields and dropping unusable links.

use std::collections::HashMap;

use super::types::{
    parse_locator, MediaItem, MediaResponse, RecordId, ResultRecord, ResultSet, UNKNOWN_ARTIST,
    UNKNOWN_MEDIA, UNKNOWN_TITLE,
};

/// Decode a response body, preserving server order
pub fn decode_results(bytes: &[u8]) -> Result<ResultSet, serde_json::Error> {
    let response: MediaResponse = serde_json::from_slice(bytes)?;

    let mut seen: HashMap<String, usize> = HashMap::new();
    let records = response
        .results
        .into_iter()
        .map(|item| into_record(item, &mut seen))
        .collect();

    Ok(records)
}

fn into_record(item: MediaItem, seen: &mut HashMap<String, usize>) -> ResultRecord {
    let artwork = parse_locator(item.artwork_url100.as_deref());
    let preview = parse_locator(item.preview_url.as_deref());

    let title = item.track_name.clone().unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let artist = item.artist_name.clone().unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
    let media_kind = item.kind.clone().unwrap_or_else(|| UNKNOWN_MEDIA.to_string());

    let key = ResultRecord::content_key(&item, &title, &artist, preview.as_ref());
    let occurrence = seen.entry(key.clone()).or_insert(0);
    let id = RecordId::derive(&key, *occurrence);
    *occurrence += 1;

    ResultRecord {
        id,
        title,
        artist,
        media_kind,
        artwork,
        preview,
    }
}
