//! Configuration management for the Spotify Missing Track Detector.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings and the
//! locations of persisted files.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Error, Result, types::Credentials};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8081";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8081/callback";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Permissions needed to read the library and private playlists.
pub const SPOTIFY_SCOPE: &str = "user-library-read playlist-read-private";

const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist and loads environment
/// variables from `<data dir>/.env` when that file is present. Variables that
/// are already set in the process environment are not overridden.
///
/// # Directory Structure
///
/// Unless `SPORDIFF_HOME` is set, the function looks for the `.env` file in:
/// - Linux: `~/.local/share/spordiff/.env`
/// - macOS: `~/Library/Application Support/spordiff/.env`
/// - Windows: `%LOCALAPPDATA%/spordiff/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created. A missing `.env`
/// file is not an error, the credentials may come from the environment.
pub async fn load_env() -> Result<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| Error::io(&dir, e))?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// Returns the Spotify API client credentials.
///
/// Both `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET` are required; an
/// unset or empty variable is reported as [`Error::Config`].
pub fn credentials() -> Result<Credentials> {
    let client_id = required_var(CLIENT_ID_VAR);
    let client_secret = required_var(CLIENT_SECRET_VAR);

    match (client_id, client_secret) {
        (Some(client_id), Some(client_secret)) => Ok(Credentials {
            client_id,
            client_secret,
        }),
        _ => Err(Error::Config(format!(
            "{} and {} environment variables must be set",
            CLIENT_ID_VAR, CLIENT_SECRET_VAR
        ))),
    }
}

fn required_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Returns the address the local OAuth callback server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:8081`. The port must
/// match the one in the redirect URI registered with Spotify.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify OAuth redirect URI (`SPOTIFY_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the directory holding every file the tool persists.
///
/// `SPORDIFF_HOME` overrides the platform-specific local data directory.
pub fn data_dir() -> PathBuf {
    if let Some(home) = env::var_os("SPORDIFF_HOME") {
        return PathBuf::from(home);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spordiff");
    path
}

/// Directory of the per-collection snapshot files.
pub fn snapshot_dir() -> PathBuf {
    data_dir().join("playlists")
}

/// Location of the cached OAuth token.
pub fn token_path() -> PathBuf {
    data_dir().join("cache/token.json")
}

/// Location of the favourites file (playlist ID to label).
pub fn favourites_path() -> PathBuf {
    data_dir().join("favourite-playlists.json")
}
