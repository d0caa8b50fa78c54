use crate::config::Config;
use crate::error::{Result, SpotifyError};

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str = "user-read-currently-playing user-read-playback-state";

/// Operator-supplied OAuth application credentials. Immutable for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
}

/// Resolves credentials with the layering: environment variable, then config
/// file, then built-in default. Client id and secret have no default.
pub fn resolve_credentials(config: &Config) -> Result<Credentials> {
    resolve_with_env(config, |key| std::env::var(key).ok())
}

fn resolve_with_env(config: &Config, env: impl Fn(&str) -> Option<String>) -> Result<Credentials> {
    let pick = |var: &str, from_file: &Option<String>| -> Option<String> {
        env(var)
            .filter(|v| !v.is_empty())
            .or_else(|| from_file.clone())
    };

    let client_id = pick("SPOTIFY_CLIENT_ID", &config.client_id)
        .ok_or(SpotifyError::CredentialsNotFound)?;
    let client_secret = pick("SPOTIFY_CLIENT_SECRET", &config.client_secret)
        .ok_or(SpotifyError::CredentialsNotFound)?;

    let redirect_uri = pick("SPOTIFY_REDIRECT_URI", &config.redirect_uri)
        .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
    let scope =
        pick("SPOTIFY_SCOPE", &config.scope).unwrap_or_else(|| DEFAULT_SCOPE.to_string());

    Ok(Credentials {
        client_id,
        client_secret,
        redirect_uri,
        scope,
    })
}
