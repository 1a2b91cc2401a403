use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{config, types::FollowArtistsRequest};

/// Server-side cap on ids per follow request.
pub const FOLLOW_BATCH_LIMIT: usize = 50;

/// Follows up to [`FOLLOW_BATCH_LIMIT`] artists in one request.
///
/// Artists the user already follows are accepted silently by the API, so
/// re-running the workflow is harmless.
pub async fn follow_artists(ids: &[String], token: &str) -> Result<(), reqwest::Error> {
    loop {
        let client = Client::new();
        let response = client
            .put(format!(
                "{}/me/following?type=artist",
                config::spotify_apiurl()
            ))
            .bearer_auth(token)
            .json(&FollowArtistsRequest { ids: ids.to_vec() })
            .send()
            .await;

        match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(_) => return Ok(()),
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
        }
    }
}
