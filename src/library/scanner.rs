use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use lofty::prelude::*;
use lofty::probe::Probe;
use walkdir::WalkDir;

use crate::types::SongRecord;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "m4a", "ogg", "wma", "aiff", "opus"];

/// Result of one full library walk.
pub struct ScanOutcome {
    /// Songs with at least artist and title tags, in walk order.
    pub songs: Vec<SongRecord>,
    /// Audio files looked at, readable or not.
    pub files_seen: usize,
    /// Audio files skipped because tags were unreadable or incomplete.
    pub skipped: usize,
}

/// Walks `root` and reads tags from every audio file found.
///
/// Files without a readable artist and title are skipped and counted, never
/// an error; the summary makes the skips visible instead of a warning per
/// file. Blocking; run it off the async runtime via `spawn_blocking`.
pub fn scan_library(root: &Path) -> ScanOutcome {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Scanning library...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut songs = Vec::new();
    let mut files_seen = 0usize;
    let mut skipped = 0usize;

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || !is_audio_file(entry.path()) {
            continue;
        }

        files_seen += 1;
        match read_song(entry.path()) {
            Some(song) => songs.push(song),
            None => skipped += 1,
        }

        if files_seen % 1000 == 0 {
            pb.set_message(format!(
                "Scanned {} files, found {} songs...",
                files_seen,
                songs.len()
            ));
        }
    }

    pb.finish_and_clear();
    ScanOutcome {
        songs,
        files_seen,
        skipped,
    }
}

fn is_audio_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    AUDIO_EXTENSIONS.contains(&ext.as_str())
}

/// Reads tags from one file; `None` when artist or title is missing or the
/// file cannot be parsed.
fn read_song(path: &Path) -> Option<SongRecord> {
    let tagged = Probe::open(path).ok()?.read().ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;

    let artist = tag.artist()?.trim().to_string();
    let title = tag.title()?.trim().to_string();
    if artist.is_empty() || title.is_empty() {
        return None;
    }
    let album = tag
        .album()
        .map(|a| a.trim().to_string())
        .unwrap_or_default();

    Some(SongRecord {
        artist,
        title,
        album,
        path: path.to_string_lossy().into_owned(),
    })
}
