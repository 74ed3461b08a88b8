use std::{cell::Cell, collections::HashMap};

use spordiff::{
    Result,
    cli::compare_and_store,
    diff::TrackSearch,
    management::{FavouritesManager, SnapshotKey, SnapshotStore, TokenManager},
    types::{Snapshot, TrackInfo},
};
use tempfile::tempdir;

struct FixedSearch(HashMap<String, Vec<TrackInfo>>);

impl TrackSearch for FixedSearch {
    async fn search_tracks(&self, query: &str) -> Result<Vec<TrackInfo>> {
        Ok(self.0.get(query).cloned().unwrap_or_default())
    }
}

fn snapshot(entries: &[(&str, &str)]) -> Snapshot {
    entries
        .iter()
        .map(|(id, display)| (id.to_string(), display.to_string()))
        .collect()
}

#[test]
fn test_saved_tracks_key_is_fixed() {
    assert_eq!(SnapshotKey::saved_tracks().as_str(), "savedSongs");
    assert_eq!(SnapshotKey::saved_tracks().file_name(), "savedSongs.json");
}

#[test]
fn test_playlist_key_truncates_long_names() {
    let name = "Supercalifragilisticexpialidocious Mix";
    let key = SnapshotKey::playlist(name, "abc123");

    let expected_name: String = name.chars().take(32).collect();
    assert_eq!(expected_name, "Supercalifragilisticexpialidocio");
    assert_eq!(key.as_str(), format!("savedSongs-{}-abc123", expected_name));
    assert_eq!(key, SnapshotKey::playlist(name, "abc123"));
}

#[test]
fn test_playlist_key_keeps_short_names_and_separates_ids() {
    let a = SnapshotKey::playlist("Road Trip", "id1");
    let b = SnapshotKey::playlist("Road Trip", "id2");

    assert_eq!(a.as_str(), "savedSongs-Road Trip-id1");
    assert_ne!(a, b);
}

#[test]
fn test_playlist_key_is_filesystem_safe() {
    let key = SnapshotKey::playlist("AC/DC: Best of?", "xyz");

    assert_eq!(key.as_str(), "savedSongs-AC_DC_ Best of_-xyz");
    assert!(!key.file_name().contains('/'));
}

#[test]
fn test_playlist_key_counts_characters_not_bytes() {
    let name = "ééééééééééééééééééééééééééééééééééé"; // 35 chars, 70 bytes
    let key = SnapshotKey::playlist(name, "id");

    let expected: String = name.chars().take(32).collect();
    assert_eq!(key.as_str(), format!("savedSongs-{}-id", expected));
}

#[tokio::test]
async fn test_load_never_written_key_is_none() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("playlists"));

    let loaded = store.load(&SnapshotKey::saved_tracks()).await.unwrap();

    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_save_then_load_replaces_whole_snapshot() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("playlists"));
    let key = SnapshotKey::playlist("Focus", "p1");

    store
        .save(&key, &snapshot(&[("t1", "Song A by X"), ("t2", "Song B by Y")]))
        .await
        .unwrap();
    store
        .save(&key, &snapshot(&[("t3", "Song C by Z")]))
        .await
        .unwrap();

    let loaded = store.load(&key).await.unwrap().unwrap();
    assert_eq!(loaded, snapshot(&[("t3", "Song C by Z")]));
    assert!(store.path(&key).is_file());
    assert!(!store.path(&key).with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_load_corrupt_snapshot_is_an_error() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let key = SnapshotKey::saved_tracks();
    std::fs::write(store.path(&key), "not json").unwrap();

    let err = store.load(&key).await.unwrap_err();

    assert!(matches!(err, spordiff::Error::Decode { .. }));
}

#[tokio::test]
async fn test_first_run_only_persists() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let key = SnapshotKey::saved_tracks();
    let current = snapshot(&[("t1", "Song A by X")]);
    let reported = Cell::new(false);

    let resolution = compare_and_store(
        &FixedSearch(HashMap::new()),
        &store,
        &key,
        &current,
        |_| reported.set(true),
    )
    .await
    .unwrap();

    assert!(resolution.is_none());
    assert!(!reported.get());
    assert_eq!(store.load(&key).await.unwrap(), Some(current));
}

#[tokio::test]
async fn test_second_run_reports_missing_and_overwrites() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path());
    let key = SnapshotKey::saved_tracks();
    store
        .save(&key, &snapshot(&[("t1", "Song A by X"), ("t2", "Song B by Y")]))
        .await
        .unwrap();

    let search = FixedSearch(HashMap::from([(
        "Song B by Y".to_string(),
        vec![TrackInfo {
            id: "t9".to_string(),
            name: "Song B (Remastered)".to_string(),
            artists: vec!["Y".to_string()],
        }],
    )]));
    let current = snapshot(&[("t1", "Song A by X")]);
    let reported = Cell::new(0);

    let resolution = compare_and_store(&search, &store, &key, &current, |r| {
        reported.set(r.missing.len())
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(reported.get(), 1);
    assert_eq!(resolution.missing["t2"], "Song B by Y");
    let candidates = &resolution.suggestions["t2"];
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, "t9");
    assert_eq!(candidates[0].display, "Song B (Remastered) by Y");
    assert_eq!(store.load(&key).await.unwrap(), Some(current));
}

#[tokio::test]
async fn test_missing_favourites_file_means_no_filter() {
    let dir = tempdir().unwrap();
    let manager = FavouritesManager::new(dir.path().join("favourite-playlists.json"));

    assert!(manager.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_favourites_file_is_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favourite-playlists.json");
    std::fs::write(&path, r#"{"37i9dQZF1DX":"focus","5ab":"gym"}"#).unwrap();

    let favourites = FavouritesManager::new(&path).load().await.unwrap().unwrap();

    assert_eq!(favourites.len(), 2);
    assert_eq!(favourites["5ab"], "gym");
}

#[tokio::test]
async fn test_token_round_trip_through_cache_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache/token.json");
    assert!(TokenManager::load(&path).await.unwrap().is_none());

    let token = spordiff::types::Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "user-library-read playlist-read-private".to_string(),
        expires_in: 3600,
        obtained_at: 1_700_000_000,
    };
    TokenManager::new(token, &path).persist().await.unwrap();

    let loaded = TokenManager::load(&path).await.unwrap().unwrap();
    assert_eq!(loaded.current_token().access_token, "access");
    assert_eq!(loaded.current_token().refresh_token, "refresh");
    assert!(loaded.is_expired());
}
