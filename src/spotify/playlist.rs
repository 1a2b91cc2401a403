use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    types::{AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse},
};

/// Server-side cap on track URIs per addition request.
pub const ADD_TRACKS_BATCH_LIMIT: usize = 100;

/// Creates a playlist for the configured user.
pub async fn create(
    name: &str,
    description: &str,
    public: bool,
    token: &str,
) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public,
        collaborative: false,
    };

    loop {
        let client = Client::new();
        let response = client
            .post(format!(
                "{uri}/users/{user}/playlists",
                uri = config::spotify_apiurl(),
                user = config::spotify_user()
            ))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        return response.json::<CreatePlaylistResponse>().await;
    }
}

/// Appends up to [`ADD_TRACKS_BATCH_LIMIT`] track URIs to a playlist.
///
/// Order within a request is preserved by the API, so callers that care
/// about overall order must send batches sequentially and stop on the first
/// failure.
pub async fn add_tracks(
    playlist_id: &str,
    uris: Vec<String>,
    token: &str,
) -> Result<AddTracksResponse, reqwest::Error> {
    let body = AddTracksRequest { uris };

    loop {
        let client = Client::new();
        let response = client
            .post(format!(
                "{uri}/playlists/{id}/tracks",
                uri = config::spotify_apiurl(),
                id = playlist_id
            ))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        return response.json::<AddTracksResponse>().await;
    }
}
