use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::SongRecord;

/// Fraction of missing files above which the cache is untrustworthy.
const MISSING_FRACTION_LIMIT: f64 = 0.10;

#[derive(Debug)]
pub enum CacheError {
    /// No cache file exists yet.
    Absent,
    Io(std::io::Error),
    /// The file exists but does not parse as the record schema.
    Corrupt(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Absent => write!(f, "no library cache found"),
            CacheError::Io(e) => write!(f, "cache I/O error: {}", e),
            CacheError::Corrupt(e) => write!(f, "cache file is corrupt: {}", e),
        }
    }
}

/// Verdict on whether a persisted scan can be trusted without rescanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheValidity {
    /// Every record's file still exists (or the snapshot is empty).
    Valid,
    /// Some files are gone, but few enough that the rest is usable.
    PartiallyValid { missing: usize },
    /// More than 10% of the files are gone; force a full rescan.
    Invalid { missing: usize },
}

/// Persisted snapshot of a library scan.
///
/// The cache file is a JSON array of `{artist, title, album, filepath}`
/// objects, stored in the splocli data directory like every other cache.
pub struct LibraryManager {
    songs: Vec<SongRecord>,
    path: PathBuf,
}

impl LibraryManager {
    pub fn new(songs: Vec<SongRecord>) -> Self {
        Self::with_path(songs, Self::cache_path())
    }

    /// Manager against an explicit cache file, mainly for tests.
    pub fn with_path(songs: Vec<SongRecord>, path: PathBuf) -> Self {
        Self { songs, path }
    }

    pub async fn load() -> Result<Self, CacheError> {
        Self::load_from(Self::cache_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, CacheError> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(CacheError::Absent),
            Err(e) => return Err(CacheError::Io(e)),
        };
        let songs: Vec<SongRecord> = serde_json::from_str(&content).map_err(CacheError::Corrupt)?;
        Ok(Self { songs, path })
    }

    /// Writes the snapshot atomically: to a temp file first, then a rename,
    /// so a crash can never leave a half-written cache behind.
    pub async fn persist(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(CacheError::Io)?;
        }

        let json = serde_json::to_string_pretty(&self.songs).map_err(CacheError::Corrupt)?;
        let tmp = self.path.with_extension("json.tmp");
        async_fs::write(&tmp, json).await.map_err(CacheError::Io)?;
        async_fs::rename(&tmp, &self.path)
            .await
            .map_err(CacheError::Io)
    }

    /// Judges the snapshot against the filesystem.
    ///
    /// An empty snapshot is Valid; missing files up to 10% of the snapshot
    /// give PartiallyValid, above that Invalid.
    pub fn validity(&self) -> CacheValidity {
        if self.songs.is_empty() {
            return CacheValidity::Valid;
        }

        let missing = self
            .songs
            .iter()
            .filter(|s| !Path::new(&s.path).exists())
            .count();

        if missing == 0 {
            CacheValidity::Valid
        } else if missing as f64 / self.songs.len() as f64 > MISSING_FRACTION_LIMIT {
            CacheValidity::Invalid { missing }
        } else {
            CacheValidity::PartiallyValid { missing }
        }
    }

    /// Drops records whose file no longer exists; returns how many were
    /// removed. Used for the PartiallyValid case.
    pub fn retain_existing(&mut self) -> usize {
        let before = self.songs.len();
        self.songs.retain(|s| Path::new(&s.path).exists());
        before - self.songs.len()
    }

    pub fn songs(&self) -> &[SongRecord] {
        &self.songs
    }

    pub fn into_songs(self) -> Vec<SongRecord> {
        self.songs
    }

    pub fn count(&self) -> usize {
        self.songs.len()
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("splocli/cache/library.json");
        path
    }
}
