use std::fs;
use std::path::{Path, PathBuf};

use splocli::management::{CacheError, CacheValidity, LibraryManager};
use splocli::types::SongRecord;
use tempfile::TempDir;

// Helper to build a snapshot with `existing` real files and `missing`
// records whose files were never created.
fn snapshot(dir: &Path, existing: usize, missing: usize) -> Vec<SongRecord> {
    let mut songs = Vec::new();
    for i in 0..existing {
        let path = dir.join(format!("song-{}.mp3", i));
        fs::write(&path, b"FAKE").unwrap();
        songs.push(record(&path, i));
    }
    for i in 0..missing {
        let path = dir.join(format!("gone-{}.mp3", i));
        songs.push(record(&path, existing + i));
    }
    songs
}

fn record(path: &Path, n: usize) -> SongRecord {
    SongRecord {
        artist: format!("Artist {}", n % 7),
        title: format!("Title {}", n),
        album: String::new(),
        path: path.to_string_lossy().into_owned(),
    }
}

fn cache_file(dir: &TempDir) -> PathBuf {
    dir.path().join("library.json")
}

#[tokio::test]
async fn test_round_trip_preserves_records_and_order() {
    let tmp = TempDir::new().unwrap();
    let songs = snapshot(tmp.path(), 5, 3);

    let manager = LibraryManager::with_path(songs.clone(), cache_file(&tmp));
    manager.persist().await.unwrap();

    let loaded = LibraryManager::load_from(cache_file(&tmp)).await.unwrap();
    assert_eq!(loaded.songs(), songs.as_slice());
}

#[tokio::test]
async fn test_persisted_schema_uses_filepath_key() {
    let tmp = TempDir::new().unwrap();
    let songs = snapshot(tmp.path(), 1, 0);

    let manager = LibraryManager::with_path(songs, cache_file(&tmp));
    manager.persist().await.unwrap();

    let raw = fs::read_to_string(cache_file(&tmp)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert!(first.get("filepath").is_some());
    assert!(first.get("artist").is_some());
    assert!(first.get("path").is_none());
}

#[tokio::test]
async fn test_persist_is_atomic_no_temp_file_left() {
    let tmp = TempDir::new().unwrap();
    let songs = snapshot(tmp.path(), 2, 0);

    let manager = LibraryManager::with_path(songs, cache_file(&tmp));
    manager.persist().await.unwrap();

    assert!(cache_file(&tmp).exists());
    assert!(!tmp.path().join("library.json.tmp").exists());
}

#[test]
fn test_validity_thresholds() {
    let tmp = TempDir::new().unwrap();

    // 0 of 100 missing
    let all_there = LibraryManager::with_path(snapshot(tmp.path(), 100, 0), cache_file(&tmp));
    assert_eq!(all_there.validity(), CacheValidity::Valid);

    // 10 of 100 missing is exactly the threshold, still usable
    let tmp = TempDir::new().unwrap();
    let at_limit = LibraryManager::with_path(snapshot(tmp.path(), 90, 10), cache_file(&tmp));
    assert_eq!(
        at_limit.validity(),
        CacheValidity::PartiallyValid { missing: 10 }
    );

    // 11 of 100 missing crosses it
    let tmp = TempDir::new().unwrap();
    let over_limit = LibraryManager::with_path(snapshot(tmp.path(), 89, 11), cache_file(&tmp));
    assert_eq!(over_limit.validity(), CacheValidity::Invalid { missing: 11 });
}

#[test]
fn test_empty_snapshot_is_valid() {
    let tmp = TempDir::new().unwrap();
    let manager = LibraryManager::with_path(Vec::new(), cache_file(&tmp));
    assert_eq!(manager.validity(), CacheValidity::Valid);
}

#[test]
fn test_retain_existing_drops_missing_records() {
    let tmp = TempDir::new().unwrap();
    let mut manager = LibraryManager::with_path(snapshot(tmp.path(), 4, 2), cache_file(&tmp));

    let removed = manager.retain_existing();

    assert_eq!(removed, 2);
    assert_eq!(manager.count(), 4);
    assert!(manager.songs().iter().all(|s| Path::new(&s.path).exists()));
}

#[tokio::test]
async fn test_load_absent_cache() {
    let tmp = TempDir::new().unwrap();
    let result = LibraryManager::load_from(cache_file(&tmp)).await;
    assert!(matches!(result, Err(CacheError::Absent)));
}

#[tokio::test]
async fn test_load_corrupt_cache() {
    let tmp = TempDir::new().unwrap();
    fs::write(cache_file(&tmp), "{ this is not an array").unwrap();

    let result = LibraryManager::load_from(cache_file(&tmp)).await;
    assert!(matches!(result, Err(CacheError::Corrupt(_))));
}

#[tokio::test]
async fn test_load_applies_album_default() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        cache_file(&tmp),
        r#"[{"artist": "A", "title": "T", "filepath": "/nowhere/t.mp3"}]"#,
    )
    .unwrap();

    let loaded = LibraryManager::load_from(cache_file(&tmp)).await.unwrap();
    assert_eq!(loaded.songs()[0].album, "");
}
