mod credentials;

pub use credentials::{resolve_credentials, Credentials, DEFAULT_REDIRECT_URI, DEFAULT_SCOPE};

use crate::error::{Result, SpotifyError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TOKEN_FILE: &str = "spotify_token.json";

const CONFIG_TEMPLATE: &str = r#"# spotify-now configuration
#
# Create an application at https://developer.spotify.com/dashboard and
# register the redirect URI there. Environment variables
# (SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET, SPOTIFY_REDIRECT_URI,
# SPOTIFY_SCOPE) take precedence over this file.

# client_id = "your-client-id"
# client_secret = "your-client-secret"
# redirect_uri = "http://127.0.0.1:8888/callback"
# scope = "user-read-currently-playing user-read-playback-state"

# Where the acquired token is cached. Defaults to spotify_token.json next to
# this file.
# token_cache = "/home/you/.config/spotify-now/spotify_token.json"
"#;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,

    /// Path of the persisted token record.
    pub token_cache: Option<PathBuf>,

    // Endpoint overrides, primarily for tests against a mock server.
    pub api_endpoint: Option<String>,
    pub auth_endpoint: Option<String>,
    pub token_endpoint: Option<String>,
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("com", "spotify-now", "spotify-now")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = match Self::path() {
            Some(p) => p,
            None => return Ok(Config::default()),
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Writes a commented template config file, refusing to clobber an
    /// existing one.
    pub fn init_template() -> Result<PathBuf> {
        let path = Self::path()
            .ok_or_else(|| SpotifyError::Config("Could not determine config directory".into()))?;

        if path.exists() {
            return Err(SpotifyError::Config(format!(
                "Config file already exists at {}",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, CONFIG_TEMPLATE)?;
        Ok(path)
    }

    /// Resolved location of the token cache: explicit config value, else
    /// next to the config file, else the current directory.
    pub fn token_cache_path(&self) -> PathBuf {
        if let Some(path) = &self.token_cache {
            return path.clone();
        }

        match Self::path().and_then(|p| p.parent().map(|d| d.to_path_buf())) {
            Some(dir) => dir.join(DEFAULT_TOKEN_FILE),
            None => PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}
