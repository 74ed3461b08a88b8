use std::{net::SocketAddr, str::FromStr};

use chrono::Utc;
use reqwest::{Client, Url, header::AUTHORIZATION};
use serde::Deserialize;
use tokio::sync::oneshot;

use crate::{
    Error, Result,
    api::CallbackState,
    config, info,
    management::TokenManager,
    server, success,
    types::{AuthSession, Credentials, Token},
    utils, warning,
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    scope: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

impl From<TokenResponse> for Token {
    fn from(res: TokenResponse) -> Self {
        Token {
            access_token: res.access_token,
            refresh_token: res.refresh_token,
            scope: res.scope,
            expires_in: res.expires_in,
            obtained_at: Utc::now().timestamp().max(0) as u64,
        }
    }
}

/// Returns a token manager for the cached token, running the browser login
/// first when no token is cached.
///
/// # Authentication Flow
///
/// 1. **Cached token**: a token file that decodes is used as is (expired
///    tokens are refreshed lazily by [`TokenManager::get_valid_token`])
/// 2. **Server start**: otherwise a local server is started for the redirect
/// 3. **Browser launch**: the authorization URL is opened in the browser
/// 4. **Completion**: the flow waits for the callback handler to report the
///    outcome over a oneshot channel, or for Ctrl-C
/// 5. **Persistence**: the token is saved for future runs
pub async fn authenticate(credentials: &Credentials) -> Result<TokenManager> {
    let path = config::token_path();
    if let Some(token_mgr) = TokenManager::load(&path).await? {
        return Ok(token_mgr);
    }

    info!("Token file does not exist. Authentication required.");
    let token = login(credentials).await?;

    let token_mgr = TokenManager::new(token, path);
    token_mgr.persist().await?;
    success!("Authentication successful!");

    Ok(token_mgr)
}

/// Runs the interactive authorization code flow and returns the new token.
pub async fn login(credentials: &Credentials) -> Result<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let session = AuthSession {
        code_verifier,
        state: utils::generate_state(),
    };

    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| Error::Config(format!("Failed to parse server address: {}", e)))?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Config(format!("Cannot bind callback server to {}: {}", addr, e)))?;

    let (done_tx, done_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let state = CallbackState::new(session.clone(), credentials.clone(), done_tx);
    let server = tokio::spawn(server::serve(listener, state, shutdown_rx));

    let auth_url = authorize_url(credentials, &session, &code_challenge)?;
    info!(
        "Please log in to Spotify by visiting the following page:\n{}",
        auth_url
    );
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!("Failed to open browser. Please open the URL above manually.");
    }

    let outcome = tokio::select! {
        received = done_rx => received.unwrap_or_else(|_| {
            Err(Error::Auth("callback listener stopped before the login completed".to_string()))
        }),
        _ = tokio::signal::ctrl_c() => Err(Error::Auth("login aborted".to_string())),
    };

    let _ = shutdown_tx.send(());
    match server.await {
        Ok(Err(e)) => warning!("Callback server stopped with an error: {}", e),
        Err(e) => warning!("Callback server task failed: {}", e),
        Ok(Ok(())) => {}
    }

    outcome
}

pub fn authorize_url(
    credentials: &Credentials,
    session: &AuthSession,
    code_challenge: &str,
) -> Result<Url> {
    let redirect_uri = config::spotify_redirect_uri();
    Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("state", session.state.as_str()),
            ("scope", config::SPOTIFY_SCOPE),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid authorization URL: {}", e)))
}

/// Exchanges an authorization code for an access token.
pub async fn exchange_code(credentials: &Credentials, code: &str, verifier: &str) -> Result<Token> {
    let redirect_uri = config::spotify_redirect_uri();
    request_token(
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_verifier", verifier),
        ],
    )
    .await
}

/// Exchanges a refresh token for a new access token.
pub async fn refresh_token(credentials: &Credentials, refresh_token: &str) -> Result<Token> {
    request_token(
        credentials,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(credentials: &Credentials, form: &[(&str, &str)]) -> Result<Token> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .header(AUTHORIZATION, utils::basic_auth_header(credentials))
        .form(form)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| Error::Auth(format!("token request failed: {}", e)))?;

    let body: TokenResponse = res
        .json()
        .await
        .map_err(|e| Error::Auth(format!("invalid token response: {}", e)))?;

    Ok(body.into())
}
