//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by spordiff:
//! authentication and read-only retrieval of the user's library, playlists and
//! track search results.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 authorization code + PKCE)
//!     ├── Client (saved tracks, playlists, playlist tracks, search)
//!     └── Pagination (offset based paging objects)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Login through the browser with a local callback server, token
//!   exchange and refresh. The client secret is sent with HTTP Basic auth.
//! - [`client`] - [`SpotifyClient`], the authenticated handle used by the CLI.
//! - [`pages`] - [`pages::Paginator`], a restartable lazy walk over pages.
//!
//! ## API Coverage
//!
//! - `GET /me/tracks` - saved tracks, 50 per page
//! - `GET /me/playlists` - playlists of the current user, 50 per page
//! - `GET /playlists/{id}/tracks` - tracks of a playlist, 100 per page
//! - `GET /search?type=track` - replacement suggestions
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Error Handling
//!
//! Requests are not retried. Any HTTP or decoding failure is returned as
//! [`crate::Error::Remote`] and aborts the run; only the replacement search is
//! downgraded to a warning by the caller.

pub mod auth;
pub mod client;
pub mod pages;

pub use client::SpotifyClient;
