use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    dispatch::dispatch,
    error, info,
    library::index,
    management::TokenManager,
    spotify::{
        follow::{FOLLOW_BATCH_LIMIT, follow_artists},
        search,
    },
    success, warning,
};

pub async fn follow(rescan: bool) {
    let songs = super::library::load_or_scan(rescan).await;
    if songs.is_empty() {
        error!("No songs with artist and title found in your library.");
    }

    let artists = index::unique_artists(&songs);
    info!("Found {} unique artists in your library.", artists.len());

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run splocli auth\n Error: {}",
                e
            );
        }
    };

    let pb = ProgressBar::new(artists.len() as u64);
    pb.set_message("Resolving artists on Spotify...");
    pb.set_style(
        ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}").unwrap(),
    );

    let mut ids: Vec<String> = Vec::new();
    let mut not_found = 0usize;
    let mut search_errors = 0usize;

    for name in &artists {
        let token = token_mgr.get_valid_token().await;
        match search::search_artist(name, &token).await {
            Ok(Some(artist)) => ids.push(artist.id),
            Ok(None) => not_found += 1,
            Err(_) => search_errors += 1,
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if ids.is_empty() {
        error!("None of your artists were found on Spotify.");
    }

    info!(
        "Following {} artists in batches of {}...",
        ids.len(),
        FOLLOW_BATCH_LIMIT
    );

    // Chunks are independent, so one failed batch never blocks the rest.
    let token = token_mgr.get_valid_token().await;
    let report = dispatch(&ids, FOLLOW_BATCH_LIMIT, false, |chunk| {
        let token = token.clone();
        async move { follow_artists(&chunk, &token).await }
    })
    .await;

    success!("Artists processed: {}", artists.len());
    success!("Artists followed: {}", report.succeeded);
    if not_found > 0 {
        warning!("Artists not found on Spotify: {}", not_found);
    }
    if search_errors > 0 {
        warning!("Artist searches that failed: {}", search_errors);
    }
    for chunk in &report.failed {
        warning!("Follow batch {} failed: {}", chunk.index + 1, chunk.error);
    }
}
