use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Opaque Spotify track identifier.
pub type TrackId = String;

/// Track ID to display string ("title by artist1, artist2") of one collection.
pub type Snapshot = HashMap<TrackId, String>;

/// Playlist ID to an arbitrary label; acts as an allow-list.
pub type FavouriteSet = HashMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Values the callback handler needs to finish a login started by the CLI.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub code_verifier: String,
    pub state: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// A playlist as returned by `GET /me/playlists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
}

impl Collection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub id: TrackId,
    pub name: String,
    pub artists: Vec<String>,
}

impl TrackInfo {
    /// Human readable form stored in snapshots and used as search query.
    pub fn display(&self) -> String {
        format!("{} by {}", self.name, self.artists.join(", "))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTrack {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
}

impl ApiTrack {
    /// Local files have no ID and cannot be tracked.
    pub fn into_track_info(self) -> Option<TrackInfo> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(TrackInfo {
            id,
            name: self.name,
            artists: self.artists.into_iter().map(|a| a.name).collect(),
        })
    }
}

/// Spotify paging object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrackItem {
    pub track: ApiTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<ApiTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Paging<ApiTrack>,
}

/// Replacement candidate for a missing track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: TrackId,
    pub display: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
}
