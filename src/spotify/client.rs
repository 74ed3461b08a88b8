use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    Result, config,
    diff::TrackSearch,
    management::TokenManager,
    spotify::pages::{PageSource, Paginator},
    types::{
        Collection, Credentials, Paging, PlaylistTrackItem, SavedTrackItem, SearchResponse,
        TrackInfo,
    },
};

const SAVED_TRACKS_PAGE_SIZE: u64 = 50;
const PLAYLISTS_PAGE_SIZE: u64 = 50;
const PLAYLIST_TRACKS_PAGE_SIZE: u64 = 100;
const PLAYLIST_TRACKS_FIELDS: &str = "items(track(id,name,artists(name))),total,next";

/// Authenticated handle on the Spotify Web API.
///
/// Every request asks the [`TokenManager`] for a valid access token first, so
/// long runs survive a token expiring halfway through.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    credentials: Credentials,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: config::spotify_apiurl(),
            credentials,
            tokens: Mutex::new(tokens),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let token = self
            .tokens
            .lock()
            .await
            .get_valid_token(&self.credentials)
            .await?;

        let url = format!("{uri}{path}", uri = self.api_url, path = path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }

    /// All tracks of the user's library ("Liked Songs").
    pub async fn saved_tracks(&self, progress: impl FnMut(u64, u64)) -> Result<Vec<TrackInfo>> {
        let items = Paginator::new(&SavedTracksPages { client: self })
            .collect_all(progress)
            .await?;

        Ok(items
            .into_iter()
            .filter_map(|item| item.track.into_track_info())
            .collect())
    }

    /// All playlists of the current user, in the order Spotify lists them.
    /// `null` entries in a page are dropped.
    pub async fn playlists(&self) -> Result<Vec<Collection>> {
        let items = Paginator::new(&PlaylistPages { client: self })
            .collect_all(|_, _| {})
            .await?;

        Ok(items.into_iter().flatten().collect())
    }

    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<TrackInfo>> {
        let items = Paginator::new(&PlaylistTrackPages {
            client: self,
            playlist_id,
        })
        .collect_all(|_, _| {})
        .await?;

        Ok(items
            .into_iter()
            .filter_map(|item| item.track.and_then(|t| t.into_track_info()))
            .collect())
    }

    /// Free-text track search, first page only.
    pub async fn search(&self, query: &str) -> Result<Vec<TrackInfo>> {
        let res: SearchResponse = self
            .get_json(
                "/search",
                &[("q", query.to_string()), ("type", "track".to_string())],
            )
            .await?;

        Ok(res
            .tracks
            .items
            .into_iter()
            .filter_map(|t| t.into_track_info())
            .collect())
    }
}

impl TrackSearch for SpotifyClient {
    async fn search_tracks(&self, query: &str) -> Result<Vec<TrackInfo>> {
        self.search(query).await
    }
}

fn page_query(offset: u64, limit: u64) -> Vec<(&'static str, String)> {
    vec![("limit", limit.to_string()), ("offset", offset.to_string())]
}

struct SavedTracksPages<'a> {
    client: &'a SpotifyClient,
}

impl PageSource for SavedTracksPages<'_> {
    type Item = SavedTrackItem;

    fn page_size(&self) -> u64 {
        SAVED_TRACKS_PAGE_SIZE
    }

    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<Paging<SavedTrackItem>> {
        self.client
            .get_json("/me/tracks", &page_query(offset, limit))
            .await
    }
}

struct PlaylistPages<'a> {
    client: &'a SpotifyClient,
}

impl PageSource for PlaylistPages<'_> {
    type Item = Option<Collection>;

    fn page_size(&self) -> u64 {
        PLAYLISTS_PAGE_SIZE
    }

    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<Paging<Option<Collection>>> {
        self.client
            .get_json("/me/playlists", &page_query(offset, limit))
            .await
    }
}

struct PlaylistTrackPages<'a> {
    client: &'a SpotifyClient,
    playlist_id: &'a str,
}

impl PageSource for PlaylistTrackPages<'_> {
    type Item = PlaylistTrackItem;

    fn page_size(&self) -> u64 {
        PLAYLIST_TRACKS_PAGE_SIZE
    }

    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<Paging<PlaylistTrackItem>> {
        let mut query = page_query(offset, limit);
        query.push(("fields", PLAYLIST_TRACKS_FIELDS.to_string()));

        self.client
            .get_json(
                &format!("/playlists/{id}/tracks", id = self.playlist_id),
                &query,
            )
            .await
    }
}
