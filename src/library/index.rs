use std::collections::HashMap;

use crate::types::SongRecord;

/// Groups songs by artist name (trimmed, case-sensitive).
///
/// Encounter order is preserved within each artist's list. Empty input
/// yields an empty map.
pub fn group_by_artist(songs: &[SongRecord]) -> HashMap<String, Vec<SongRecord>> {
    let mut groups: HashMap<String, Vec<SongRecord>> = HashMap::new();
    for song in songs {
        groups
            .entry(song.artist.trim().to_string())
            .or_default()
            .push(song.clone());
    }
    groups
}

/// Distinct artist names from a song list, trimmed, first-seen order.
pub fn unique_artists(songs: &[SongRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    songs
        .iter()
        .map(|s| s.artist.trim().to_string())
        .filter(|a| !a.is_empty() && seen.insert(a.clone()))
        .collect()
}
