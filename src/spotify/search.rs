use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{Artist, ArtistSearchResponse, SongRecord, TrackMatch, TrackSearchResponse},
    warning,
};

/// Outcome of the shared retry policy for one HTTP attempt.
enum Attempt {
    Done(Response),
    Retry,
}

/// Applies the rate limit and gateway retry policy to a search response.
///
/// 429 sleeps for the advertised `Retry-After` (when it is at most two
/// minutes) and retries; 502 retries after 10 seconds. Everything else
/// either passes through or propagates as an error.
async fn check_response(
    response: Result<Response, reqwest::Error>,
) -> Result<Attempt, reqwest::Error> {
    let response = match response {
        Ok(resp) => resp,
        Err(err) => return Err(err),
    };

    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1);
        if retry_after <= 120 {
            sleep(Duration::from_secs(retry_after)).await;
            return Ok(Attempt::Retry);
        }
        warning!(
            "Rate limited for {} seconds; giving up on this request.",
            retry_after
        );
    }

    match response.error_for_status() {
        Ok(valid_response) => Ok(Attempt::Done(valid_response)),
        Err(err) => {
            if let Some(status) = err.status() {
                if status == StatusCode::BAD_GATEWAY {
                    sleep(Duration::from_secs(10)).await;
                    return Ok(Attempt::Retry);
                }
            }
            Err(err)
        }
    }
}

/// Resolves a local artist name to a Spotify artist.
///
/// Returns `Ok(None)` when the catalog has no match; that is counted by the
/// caller, never treated as a failure.
pub async fn search_artist(name: &str, token: &str) -> Result<Option<Artist>, reqwest::Error> {
    let query = format!("artist:\"{}\"", name);

    loop {
        let client = Client::new();
        let response = client
            .get(format!("{}/search", config::spotify_apiurl()))
            .query(&[("q", query.as_str()), ("type", "artist"), ("limit", "1")])
            .bearer_auth(token)
            .send()
            .await;

        let response = match check_response(response).await? {
            Attempt::Done(resp) => resp,
            Attempt::Retry => continue,
        };

        let res = response.json::<ArtistSearchResponse>().await?;
        return Ok(res.artists.items.into_iter().next());
    }
}

/// Resolves a local song to its best catalog match, if any.
///
/// Asks for the top five candidates and applies [`pick_best_track`].
pub async fn search_track(
    song: &SongRecord,
    token: &str,
) -> Result<Option<TrackMatch>, reqwest::Error> {
    let query = format!("track:\"{}\" artist:\"{}\"", song.title, song.artist);

    loop {
        let client = Client::new();
        let response = client
            .get(format!("{}/search", config::spotify_apiurl()))
            .query(&[("q", query.as_str()), ("type", "track"), ("limit", "5")])
            .bearer_auth(token)
            .send()
            .await;

        let response = match check_response(response).await? {
            Attempt::Done(resp) => resp,
            Attempt::Retry => continue,
        };

        let res = response.json::<TrackSearchResponse>().await?;
        return Ok(pick_best_track(&res.tracks.items, &song.artist, &song.album).cloned());
    }
}

/// Picks the best candidate for a local song.
///
/// A candidate only qualifies when one of its listed artists matches
/// case-insensitively. Among qualifying candidates, one whose album also
/// matches case-insensitively wins immediately; otherwise the first
/// qualifying candidate is kept. No qualifying candidate means no match.
pub fn pick_best_track<'a>(
    candidates: &'a [TrackMatch],
    artist: &str,
    album: &str,
) -> Option<&'a TrackMatch> {
    let wanted_artist = artist.to_lowercase();
    let wanted_album = album.to_lowercase();

    let mut best: Option<&TrackMatch> = None;
    for track in candidates {
        let artist_matches = track
            .artists
            .iter()
            .any(|a| a.name.to_lowercase() == wanted_artist);
        if !artist_matches {
            continue;
        }
        if best.is_none() {
            best = Some(track);
        }
        if !wanted_album.is_empty() && track.album.name.to_lowercase() == wanted_album {
            return Some(track);
        }
    }

    best
}
