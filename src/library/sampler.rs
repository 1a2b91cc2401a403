use std::collections::{HashMap, HashSet};

use rand::{Rng, seq::SliceRandom};

use crate::library::index;
use crate::types::SongRecord;

struct ArtistPool {
    remaining: Vec<SongRecord>,
    taken: usize,
}

/// Selects up to `target_count` songs from `library`, never repeating a song
/// and never taking more than `per_artist_limit` songs from one artist.
///
/// This is bounded fair-share sampling: artists are visited round-robin in a
/// shuffled order and each visit picks uniformly among that artist's
/// remaining songs, so artists with huge catalogs cannot dominate the result
/// the way uniform sampling over all songs would let them.
///
/// The pass order and every pick come from `rng`, which makes the whole
/// selection reproducible from a seed. Terminates when the target is reached
/// or a full pass over all artists adds nothing, meaning every artist is
/// either at its quota or out of songs; in that case the (shorter) partial
/// selection is returned and the caller decides whether to warn.
pub fn select<R: Rng + ?Sized>(
    library: &[SongRecord],
    target_count: usize,
    per_artist_limit: usize,
    rng: &mut R,
) -> Vec<SongRecord> {
    if per_artist_limit == 0 {
        return Vec::new();
    }

    // Identical records in the scan collapse to a single candidate.
    let mut seen: HashSet<&SongRecord> = HashSet::new();
    let unique: Vec<SongRecord> = library.iter().filter(|s| seen.insert(*s)).cloned().collect();

    let target = target_count.min(unique.len());
    if target == 0 {
        return Vec::new();
    }

    let groups = index::group_by_artist(&unique);
    let mut artists: Vec<String> = groups.keys().cloned().collect();
    // Sort before shuffling so the visiting order depends only on the rng,
    // not on map iteration order.
    artists.sort();
    artists.shuffle(rng);

    let mut pools: HashMap<String, ArtistPool> = groups
        .into_iter()
        .map(|(artist, songs)| {
            (
                artist,
                ArtistPool {
                    remaining: songs,
                    taken: 0,
                },
            )
        })
        .collect();

    let mut picked: Vec<SongRecord> = Vec::with_capacity(target);
    loop {
        let mut progressed = false;
        for artist in &artists {
            if picked.len() == target {
                return picked;
            }
            let Some(pool) = pools.get_mut(artist) else {
                continue;
            };
            if pool.taken >= per_artist_limit || pool.remaining.is_empty() {
                continue;
            }
            let idx = rng.random_range(0..pool.remaining.len());
            picked.push(pool.remaining.swap_remove(idx));
            pool.taken += 1;
            progressed = true;
        }
        if !progressed {
            // Every artist is at quota or exhausted.
            break;
        }
    }

    picked
}
