use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    dispatch::dispatch,
    error, info,
    library::sampler,
    management::TokenManager,
    spotify::{
        playlist::{ADD_TRACKS_BATCH_LIMIT, add_tracks, create},
        search,
    },
    success, warning,
};

pub struct PlaylistParams {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub tracks: usize,
    pub per_artist: usize,
    pub rescan: bool,
}

pub async fn playlist(params: PlaylistParams) {
    if params.per_artist == 0 {
        error!("--per-artist must be at least 1.");
    }

    let songs = super::library::load_or_scan(params.rescan).await;
    if songs.is_empty() {
        error!("No songs with artist and title found in your library.");
    }

    info!(
        "Selecting up to {} songs with at most {} per artist...",
        params.tracks, params.per_artist
    );
    let selection = sampler::select(&songs, params.tracks, params.per_artist, &mut rand::rng());
    if selection.len() < params.tracks.min(songs.len()) {
        warning!(
            "Only {} songs selectable under the per-artist limit; building a shorter playlist.",
            selection.len()
        );
    }

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run splocli auth\n Error: {}",
                e
            );
        }
    };

    let pb = ProgressBar::new(selection.len() as u64);
    pb.set_message("Resolving tracks on Spotify...");
    pb.set_style(
        ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}").unwrap(),
    );

    let mut uris: Vec<String> = Vec::new();
    let mut not_found = 0usize;
    let mut search_errors = 0usize;

    for song in &selection {
        let token = token_mgr.get_valid_token().await;
        match search::search_track(song, &token).await {
            Ok(Some(track)) => uris.push(track.uri),
            Ok(None) => not_found += 1,
            Err(_) => search_errors += 1,
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "Found {} of {} selected songs on Spotify ({} not found, {} search failures).",
        uris.len(),
        selection.len(),
        not_found,
        search_errors
    );

    if uris.is_empty() {
        error!("No matching Spotify tracks found; nothing to add.");
    }

    let token = token_mgr.get_valid_token().await;
    let created = match create(&params.name, &params.description, params.public, &token).await {
        Ok(p) => p,
        Err(e) => error!("Failed to create playlist: {}", e),
    };
    success!("Playlist '{}' created (id {}).", created.name, created.id);

    // Halt on the first failed batch: a truncated playlist is obviously
    // truncated, while skipping a middle batch would silently reorder it.
    let token = token_mgr.get_valid_token().await;
    let playlist_id = created.id.clone();
    let report = dispatch(&uris, ADD_TRACKS_BATCH_LIMIT, true, |chunk| {
        let token = token.clone();
        let playlist_id = playlist_id.clone();
        async move { add_tracks(&playlist_id, chunk, &token).await.map(|_| ()) }
    })
    .await;

    success!(
        "Added {} of {} tracks to '{}'.",
        report.succeeded,
        uris.len(),
        created.name
    );
    if let Some(chunk) = report.failed.first() {
        warning!(
            "Track batch {} failed; remaining batches skipped: {}",
            chunk.index + 1,
            chunk.error
        );
    }
}
