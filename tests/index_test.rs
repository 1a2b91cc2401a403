use splocli::library::index::{group_by_artist, unique_artists};
use splocli::types::SongRecord;

fn song(artist: &str, title: &str) -> SongRecord {
    SongRecord {
        artist: artist.to_string(),
        title: title.to_string(),
        album: String::new(),
        path: format!("/music/{}.mp3", title),
    }
}

#[test]
fn test_groups_preserve_encounter_order() {
    let songs = vec![
        song("A", "one"),
        song("B", "two"),
        song("A", "three"),
        song("A", "four"),
    ];

    let groups = group_by_artist(&songs);

    assert_eq!(groups.len(), 2);
    let titles: Vec<&str> = groups["A"].iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "three", "four"]);
}

#[test]
fn test_artist_keys_are_trimmed_but_case_sensitive() {
    let songs = vec![
        song("  Neko Case ", "one"),
        song("Neko Case", "two"),
        song("neko case", "three"),
    ];

    let groups = group_by_artist(&songs);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups["Neko Case"].len(), 2);
    assert_eq!(groups["neko case"].len(), 1);
}

#[test]
fn test_empty_input_yields_empty_mapping() {
    assert!(group_by_artist(&[]).is_empty());
}

#[test]
fn test_unique_artists_dedupes_in_first_seen_order() {
    let songs = vec![
        song("B", "one"),
        song("A", "two"),
        song(" B ", "three"),
        song("C", "four"),
        song("", "untagged"),
    ];

    assert_eq!(unique_artists(&songs), vec!["B", "A", "C"]);
}
