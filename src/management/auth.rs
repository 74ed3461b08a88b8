use std::path::PathBuf;

use chrono::Utc;

use crate::{
    Error, Result,
    spotify,
    types::{Credentials, Token},
};

/// Seconds before the real expiry at which a token counts as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, path: impl Into<PathBuf>) -> Self {
        TokenManager {
            token,
            path: path.into(),
        }
    }

    /// Returns `Ok(None)` when no token was cached yet.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Option<Self>> {
        let path = path.into();
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };
        let token: Token = serde_json::from_str(&content).map_err(|e| Error::decode(&path, e))?;
        Ok(Some(Self { token, path }))
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }

        let json =
            serde_json::to_string_pretty(&self.token).map_err(|e| Error::encode(&self.path, e))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| Error::io(&self.path, e))
    }

    /// Access token, refreshed and persisted first when it is about to expire.
    pub async fn get_valid_token(&mut self, credentials: &Credentials) -> Result<String> {
        if self.is_expired() {
            if self.token.refresh_token.is_empty() {
                return Err(Error::Auth(
                    "access token expired and no refresh token is cached".to_string(),
                ));
            }
            let fresh = spotify::auth::refresh_token(credentials, &self.token.refresh_token).await?;
            self.token = merge_refreshed(&self.token, fresh);
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp().max(0) as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}

// Spotify may omit the refresh token and scope on refresh.
fn merge_refreshed(old: &Token, mut fresh: Token) -> Token {
    if fresh.refresh_token.is_empty() {
        fresh.refresh_token = old.refresh_token.clone();
    }
    if fresh.scope.is_empty() {
        fresh.scope = old.scope.clone();
    }
    fresh
}
