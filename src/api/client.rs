use crate::error::{Result, SpotifyError};
use crate::types::CurrentlyPlaying;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://api.spotify.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SpotifyClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(token: &str, endpoint: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(SpotifyError::Network)?;

        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
            token: token.to_string(),
        })
    }

    /// One read of the current playback state. `Ok(None)` is the valid
    /// empty result: no active playback session (HTTP 204).
    pub async fn currently_playing(&self) -> Result<Option<CurrentlyPlaying>> {
        let url = format!("{}/me/player/currently-playing", self.endpoint);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(SpotifyError::RateLimited { retry_after });
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(SpotifyError::AuthFailed("Invalid or expired token".into()));
        }

        let response = response.error_for_status()?;

        let body = response.text().await?;
        let playing: CurrentlyPlaying = serde_json::from_str(&body)
            .map_err(|e| SpotifyError::MalformedResponse(e.to_string()))?;

        Ok(Some(playing))
    }
}
