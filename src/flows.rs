//! The two top-level flows: interactive token acquisition and the
//! now-playing query. Both print their outcome; neither lets a failure
//! escape to the caller.

use crate::api::SpotifyClient;
use crate::auth::Authenticator;
use crate::cli::{self, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::types::{CurrentlyPlaying, PlaybackSnapshot};

/// Runs the interactive OAuth flow and reports the outcome. Failure kinds
/// are distinguished in the logs only; the user-facing message stays
/// uniform.
pub async fn acquire_token(auth: &Authenticator, quiet: bool) {
    match auth.acquire_and_store_token().await {
        Ok(record) => {
            if !quiet {
                println!("Token saved to {}", auth.token_cache().display());
                if let Some(expires) =
                    chrono::DateTime::<chrono::Utc>::from_timestamp(record.expires_at, 0)
                {
                    println!(
                        "Access token valid until {} (refreshes automatically)",
                        expires.format("%Y-%m-%d %H:%M UTC")
                    );
                }
            }
        }
        Err(err) => {
            log::warn!("token acquisition failed: {err}");
            println!("OAuth flow did not complete. Try again.");
        }
    }
}

/// One playback-state query. Every failure is caught here, logged with its
/// raw text, and collapsed to `None`. No retry.
pub async fn get_currently_playing(
    auth: &Authenticator,
    config: &Config,
    format: &OutputFormat,
) -> Option<PlaybackSnapshot> {
    match query_playback(auth, config).await {
        Ok(Some(playing)) => match PlaybackSnapshot::from_playing(&playing) {
            Some(snapshot) => {
                cli::format_now_playing(&snapshot, format);
                Some(snapshot)
            }
            None => {
                println!("{}", cli::NOTHING_PLAYING);
                None
            }
        },
        Ok(None) => {
            println!("{}", cli::NOTHING_PLAYING);
            None
        }
        Err(err) => {
            log::warn!("now-playing query failed: {err}");
            eprintln!("Request failed: {err}");
            None
        }
    }
}

async fn query_playback(
    auth: &Authenticator,
    config: &Config,
) -> Result<Option<CurrentlyPlaying>> {
    let token = auth.bearer_token().await?;
    let client = SpotifyClient::new(&token, config.api_endpoint.as_deref())?;
    client.currently_playing().await
}
