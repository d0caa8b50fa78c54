use crate::error::{Result, SpotifyError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tokens refresh this many seconds before their nominal expiry so a request
/// issued right at the boundary does not go out with a stale token.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The persisted outcome of an authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) after which the access token is invalid.
    pub expires_at: i64,
    pub scope: Option<String>,
    pub token_type: String,
}

impl TokenRecord {
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires_in_secs: u64,
        scope: Option<String>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: Utc::now().timestamp() + expires_in_secs as i64,
            scope,
            token_type: "Bearer".to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() + EXPIRY_MARGIN_SECS >= self.expires_at
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(record)
    }

    /// Writes the record as indented JSON. The write goes through a sibling
    /// temp file and a rename so a crash mid-write never leaves a truncated
    /// token file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            SpotifyError::Io(e)
        })?;
        Ok(())
    }
}
