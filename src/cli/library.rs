use std::collections::HashSet;
use std::path::PathBuf;

use tabled::Table;

use crate::{
    config, error, info,
    library::{index, scanner},
    management::{CacheError, CacheValidity, LibraryManager},
    success,
    types::{LibraryTableRow, SongRecord},
    warning,
};

pub async fn update_library(rescan: bool) {
    let songs = load_or_scan(rescan).await;
    if songs.is_empty() {
        warning!("Library is empty; nothing cached.");
    } else {
        success!("Library cache holds {} songs.", songs.len());
    }
}

pub async fn list_library(search: Option<String>) {
    let manager = match LibraryManager::load().await {
        Ok(manager) => manager,
        Err(CacheError::Absent) => {
            error!("No library cache found. Run splocli library update first.");
        }
        Err(e) => error!("Failed to load library cache: {}", e),
    };

    let groups = index::group_by_artist(manager.songs());
    let mut rows: Vec<LibraryTableRow> = groups
        .into_iter()
        .map(|(artist, songs)| {
            let albums: HashSet<&str> = songs
                .iter()
                .map(|s| s.album.as_str())
                .filter(|a| !a.is_empty())
                .collect();
            LibraryTableRow {
                artist,
                songs: songs.len(),
                albums: albums.len(),
            }
        })
        .collect();

    rows.sort_by(|a, b| a.artist.to_lowercase().cmp(&b.artist.to_lowercase()));

    if let Some(term) = search {
        let term = term.to_lowercase();
        rows.retain(|r| r.artist.to_lowercase().contains(&term));
    }

    let table = Table::new(rows);
    println!("{}", table);
}

/// Loads the cached library, reconciling it against the filesystem, or runs
/// a full scan when the cache is absent, corrupt, too stale or bypassed.
///
/// A scan that finds nothing leaves the previous cache file untouched; an
/// empty result is more likely a misconfigured path than ground truth.
pub(crate) async fn load_or_scan(force_rescan: bool) -> Vec<SongRecord> {
    if !force_rescan {
        match LibraryManager::load().await {
            Ok(mut manager) => match manager.validity() {
                CacheValidity::Valid => {
                    info!("Loaded {} songs from cache.", manager.count());
                    return manager.into_songs();
                }
                CacheValidity::PartiallyValid { missing } => {
                    manager.retain_existing();
                    warning!(
                        "{} cached songs point to missing files; using the {} that remain.",
                        missing,
                        manager.count()
                    );
                    return manager.into_songs();
                }
                CacheValidity::Invalid { missing } => {
                    warning!(
                        "More than 10% of cached files are missing ({} of {}). Forcing a full rescan.",
                        missing,
                        manager.count()
                    );
                }
            },
            Err(CacheError::Absent) => {
                info!("No library cache found; scanning.");
            }
            Err(e) => {
                warning!("Cannot use library cache: {}. Forcing a full rescan.", e);
            }
        }
    }

    rescan().await
}

async fn rescan() -> Vec<SongRecord> {
    let root = PathBuf::from(config::music_library_path());
    info!("Scanning local music library at {}", root.display());

    let outcome = match tokio::task::spawn_blocking(move || scanner::scan_library(&root)).await {
        Ok(outcome) => outcome,
        Err(e) => error!("Library scan failed: {}", e),
    };

    success!(
        "Scanned {} audio files, found {} songs with artist and title ({} skipped).",
        outcome.files_seen,
        outcome.songs.len(),
        outcome.skipped
    );

    if outcome.songs.is_empty() {
        warning!("Scan found no songs; keeping the previous cache, if any.");
        return Vec::new();
    }

    let manager = LibraryManager::new(outcome.songs.clone());
    if let Err(e) = manager.persist().await {
        warning!("Failed to write library cache: {}", e);
    }

    outcome.songs
}
