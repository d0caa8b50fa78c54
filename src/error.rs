use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("Authorization was denied by the user")]
    AuthDenied,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Client credentials not found. Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET or run 'spotify-now config init'")]
    CredentialsNotFound,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Rate limited{}", match .retry_after {
        Some(secs) => format!(". Retry after {} seconds", secs),
        None => ". Please wait and try again".to_string(),
    })]
    RateLimited { retry_after: Option<u64> },
}

pub type Result<T> = std::result::Result<T, SpotifyError>;
