use std::collections::{HashMap, HashSet};

use rand::{SeedableRng, rngs::StdRng};
use splocli::library::sampler::select;
use splocli::types::SongRecord;

// Helper function to create a test song
fn song(artist: &str, title: &str) -> SongRecord {
    SongRecord {
        artist: artist.to_string(),
        title: title.to_string(),
        album: format!("{} Album", artist),
        path: format!("/music/{}/{}.mp3", artist, title),
    }
}

// Library with `artists` artists and `songs_each` songs per artist
fn library(artists: usize, songs_each: usize) -> Vec<SongRecord> {
    (0..artists)
        .flat_map(|a| (0..songs_each).map(move |s| song(&format!("Artist {}", a), &format!("Song {}", s))))
        .collect()
}

fn counts_per_artist(selection: &[SongRecord]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for s in selection {
        *counts.entry(s.artist.clone()).or_default() += 1;
    }
    counts
}

#[test]
fn test_no_duplicate_songs() {
    let mut lib = library(4, 6);
    // Duplicate records collapse to one candidate
    lib.extend(library(4, 6));

    let mut rng = StdRng::seed_from_u64(7);
    let selection = select(&lib, 100, 10, &mut rng);

    let distinct: HashSet<&SongRecord> = selection.iter().collect();
    assert_eq!(distinct.len(), selection.len());
    // 4 artists x 6 unique songs is all there is
    assert_eq!(selection.len(), 24);
}

#[test]
fn test_per_artist_cap_is_respected() {
    let lib = library(3, 5);

    let mut rng = StdRng::seed_from_u64(42);
    let selection = select(&lib, 100, 2, &mut rng);

    for (artist, count) in counts_per_artist(&selection) {
        assert!(count <= 2, "{} contributed {} songs", artist, count);
    }
    // 3 artists capped at 2 each
    assert_eq!(selection.len(), 6);
}

#[test]
fn test_terminates_when_quota_exhausts_before_target() {
    // 5 artists x 2 songs, one song per artist allowed, target 10:
    // the result caps at one-per-artist exhaustion instead of looping.
    let lib = library(5, 2);

    let mut rng = StdRng::seed_from_u64(1);
    let selection = select(&lib, 10, 1, &mut rng);

    assert_eq!(selection.len(), 5);
    for (_, count) in counts_per_artist(&selection) {
        assert_eq!(count, 1);
    }
}

#[test]
fn test_exact_fit_selects_everything() {
    // 10 distinct songs from 10 distinct artists fit the target exactly.
    let lib = library(10, 1);

    let mut rng = StdRng::seed_from_u64(99);
    let selection = select(&lib, 10, 3, &mut rng);

    assert_eq!(selection.len(), 10);
    let selected: HashSet<&SongRecord> = selection.iter().collect();
    for s in &lib {
        assert!(selected.contains(s));
    }
}

#[test]
fn test_target_capped_by_library_size() {
    let lib = library(2, 2);

    let mut rng = StdRng::seed_from_u64(3);
    let selection = select(&lib, 1000, 10, &mut rng);

    assert_eq!(selection.len(), 4);
}

#[test]
fn test_zero_target_and_empty_library() {
    let lib = library(3, 3);
    let mut rng = StdRng::seed_from_u64(5);

    assert!(select(&lib, 0, 3, &mut rng).is_empty());
    assert!(select(&[], 10, 3, &mut rng).is_empty());
}

#[test]
fn test_selection_is_deterministic_for_a_seed() {
    let lib = library(8, 4);

    let mut rng_a = StdRng::seed_from_u64(1234);
    let mut rng_b = StdRng::seed_from_u64(1234);

    let first = select(&lib, 12, 2, &mut rng_a);
    let second = select(&lib, 12, 2, &mut rng_b);

    assert_eq!(first, second);
}

#[test]
fn test_round_robin_spreads_across_artists() {
    // One large catalog next to two small ones: fair-share sampling must
    // not let the large artist crowd the others out of a 6-song selection.
    let mut lib = library(1, 50);
    lib.extend(vec![song("Small A", "Only One"), song("Small B", "Only One")]);

    let mut rng = StdRng::seed_from_u64(21);
    let selection = select(&lib, 6, 4, &mut rng);

    let counts = counts_per_artist(&selection);
    assert_eq!(counts.get("Small A"), Some(&1));
    assert_eq!(counts.get("Small B"), Some(&1));
    assert_eq!(counts.get("Artist 0"), Some(&4));
}
