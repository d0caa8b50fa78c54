mod token;

pub use token::TokenRecord;

use crate::config::Credentials;
use crate::error::{Result, SpotifyError};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, RefreshToken, RequestTokenError, Scope, TokenResponse, TokenUrl,
};
use std::io::Write;
use std::path::PathBuf;

const DEFAULT_AUTH_ENDPOINT: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_ENDPOINT: &str = "https://accounts.spotify.com/api/token";

/// Lifetime to assume when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Drives the authorization-code flow against the Spotify Accounts service
/// and owns the on-disk token cache.
pub struct Authenticator {
    oauth: BasicClient,
    scope: String,
    token_cache: PathBuf,
}

impl Authenticator {
    pub fn new(
        credentials: &Credentials,
        token_cache: PathBuf,
        auth_endpoint: Option<&str>,
        token_endpoint: Option<&str>,
    ) -> Result<Self> {
        let auth_url = AuthUrl::new(auth_endpoint.unwrap_or(DEFAULT_AUTH_ENDPOINT).to_string())
            .map_err(|e| SpotifyError::Config(format!("Invalid authorization endpoint: {e}")))?;
        let token_url = TokenUrl::new(token_endpoint.unwrap_or(DEFAULT_TOKEN_ENDPOINT).to_string())
            .map_err(|e| SpotifyError::Config(format!("Invalid token endpoint: {e}")))?;
        let redirect_url = RedirectUrl::new(credentials.redirect_uri.clone())
            .map_err(|e| SpotifyError::Config(format!("Invalid redirect URI: {e}")))?;

        let oauth = BasicClient::new(
            ClientId::new(credentials.client_id.clone()),
            Some(ClientSecret::new(credentials.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(redirect_url);

        Ok(Self {
            oauth,
            scope: credentials.scope.clone(),
            token_cache,
        })
    }

    pub fn token_cache(&self) -> &std::path::Path {
        &self.token_cache
    }

    /// Runs the interactive consent step: prints the authorization URL,
    /// waits for the user to paste the redirect URL back, exchanges the code
    /// and persists the record. Blocks until the user responds.
    pub async fn acquire_and_store_token(&self) -> Result<TokenRecord> {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut request = self.oauth.authorize_url(CsrfToken::new_random);
        for scope in self.scope.split_whitespace() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        let (auth_url, _csrf_token) = request.set_pkce_challenge(pkce_challenge).url();

        println!("Open this URL in your browser and approve access:\n\n{auth_url}\n");
        print!("Paste the URL you were redirected to: ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        self.complete_from_redirect(input.trim(), Some(pkce_verifier))
            .await
    }

    /// Completes the flow from a redirect URL: extracts the code, exchanges
    /// it, and writes the token cache. Nothing is written on any failure.
    pub async fn complete_from_redirect(
        &self,
        redirect_url: &str,
        pkce_verifier: Option<PkceCodeVerifier>,
    ) -> Result<TokenRecord> {
        let code = parse_redirect_code(redirect_url)?;
        let record = self.exchange_code(&code, pkce_verifier).await?;
        record.save(&self.token_cache)?;
        log::info!("token record written to {}", self.token_cache.display());
        Ok(record)
    }

    async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: Option<PkceCodeVerifier>,
    ) -> Result<TokenRecord> {
        let mut request = self.oauth.exchange_code(AuthorizationCode::new(code.to_string()));
        if let Some(verifier) = pkce_verifier {
            request = request.set_pkce_verifier(verifier);
        }

        let response = request
            .request_async(async_http_client)
            .await
            .map_err(|e| token_error("code exchange", e))?;

        Ok(record_from_response(&response, None))
    }

    /// Refreshes an expired record via the refresh grant and rewrites the
    /// cache. Spotify does not always rotate the refresh token, so the old
    /// one is carried forward when the response omits it.
    pub async fn refresh(&self, record: &TokenRecord) -> Result<TokenRecord> {
        let refresh_token = record
            .refresh_token
            .as_deref()
            .ok_or_else(|| SpotifyError::AuthFailed("No refresh token in cache".into()))?;

        let response = self
            .oauth
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| token_error("token refresh", e))?;

        let refreshed = record_from_response(&response, record.refresh_token.clone());
        refreshed.save(&self.token_cache)?;
        log::debug!("access token refreshed, new expiry {}", refreshed.expires_at);
        Ok(refreshed)
    }

    /// Resolves a usable bearer token: cached and unexpired, else refreshed,
    /// else freshly acquired through the interactive flow.
    pub async fn bearer_token(&self) -> Result<String> {
        match TokenRecord::load(&self.token_cache) {
            Ok(record) if !record.is_expired() => Ok(record.access_token),
            Ok(record) if record.refresh_token.is_some() => {
                log::debug!("cached token expired, refreshing");
                Ok(self.refresh(&record).await?.access_token)
            }
            Ok(_) => {
                log::debug!("cached token expired with no refresh token");
                Ok(self.acquire_and_store_token().await?.access_token)
            }
            Err(e) => {
                log::debug!("no usable token cache ({e}), starting interactive flow");
                Ok(self.acquire_and_store_token().await?.access_token)
            }
        }
    }
}

fn record_from_response(
    response: &oauth2::basic::BasicTokenResponse,
    fallback_refresh_token: Option<String>,
) -> TokenRecord {
    let scope = response
        .scopes()
        .map(|scopes| {
            scopes
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|s| !s.is_empty());

    TokenRecord::new(
        response.access_token().secret().clone(),
        response
            .refresh_token()
            .map(|t| t.secret().clone())
            .or(fallback_refresh_token),
        response
            .expires_in()
            .map(|d| d.as_secs())
            .unwrap_or(DEFAULT_EXPIRES_IN_SECS),
        scope,
    )
}

fn token_error<RE, TE>(stage: &str, err: RequestTokenError<RE, TE>) -> SpotifyError
where
    RE: std::error::Error + 'static,
    TE: oauth2::ErrorResponse + 'static,
{
    match err {
        RequestTokenError::ServerResponse(resp) => {
            log::warn!("{stage}: provider rejected the request: {resp:?}");
            SpotifyError::AuthFailed(format!("Provider rejected the {stage}: {resp:?}"))
        }
        RequestTokenError::Request(e) => {
            log::warn!("{stage}: network failure: {e}");
            SpotifyError::AuthFailed(format!("Network failure during {stage}: {e}"))
        }
        RequestTokenError::Parse(e, _) => {
            log::warn!("{stage}: malformed token response: {e}");
            SpotifyError::AuthFailed(format!("Malformed token response during {stage}: {e}"))
        }
        RequestTokenError::Other(msg) => {
            log::warn!("{stage}: {msg}");
            SpotifyError::AuthFailed(msg)
        }
    }
}

/// Extracts the `code` query parameter from the pasted redirect URL.
/// `error=access_denied` means the user declined consent.
fn parse_redirect_code(redirect_url: &str) -> Result<String> {
    if let Some(error) = query_param(redirect_url, "error") {
        if error == "access_denied" {
            return Err(SpotifyError::AuthDenied);
        }
        return Err(SpotifyError::AuthFailed(format!(
            "Provider returned error '{error}'"
        )));
    }

    query_param(redirect_url, "code").ok_or_else(|| {
        SpotifyError::MalformedResponse("Redirect URL contains no authorization code".into())
    })
}

fn query_param(url: &str, name: &str) -> Option<String> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or(url);
    let query = query.split('#').next().unwrap_or(query);

    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_from_redirect() {
        let code =
            parse_redirect_code("https://example.com/callback?code=abc123&state=xyz").unwrap();
        assert_eq!(code, "abc123");
    }

    #[test]
    fn test_parse_code_ignores_fragment() {
        let code = parse_redirect_code("https://example.com/cb?code=abc123#frag").unwrap();
        assert_eq!(code, "abc123");
    }

    #[test]
    fn test_denied_redirect_maps_to_auth_denied() {
        let result =
            parse_redirect_code("https://example.com/cb?error=access_denied&state=xyz");
        assert!(matches!(result, Err(SpotifyError::AuthDenied)));
    }

    #[test]
    fn test_other_provider_error_is_auth_failed() {
        let result = parse_redirect_code("https://example.com/cb?error=invalid_scope");
        match result {
            Err(SpotifyError::AuthFailed(msg)) => assert!(msg.contains("invalid_scope")),
            other => panic!("expected AuthFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_code_is_malformed() {
        let result = parse_redirect_code("https://example.com/cb?state=xyz");
        assert!(matches!(result, Err(SpotifyError::MalformedResponse(_))));
    }

    #[test]
    fn test_bare_query_string_accepted() {
        // Users sometimes paste just the query portion.
        let code = parse_redirect_code("code=abc123&state=xyz").unwrap();
        assert_eq!(code, "abc123");
    }
}
