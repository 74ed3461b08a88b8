use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    diff::{self, Resolution, TrackSearch},
    info,
    management::{SnapshotKey, SnapshotStore},
    notify, selector,
    spotify::SpotifyClient,
    success,
    types::{Collection, FavouriteSet, Snapshot},
};

/// Which collections a run looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub saved_tracks: bool,
    pub playlists: bool,
    pub favourites_only: bool,
}

impl ScanOptions {
    /// Saved tracks are scanned unless only other playlists were asked for.
    pub fn from_flags(other: bool, all: bool, favourites: bool) -> Self {
        Self {
            saved_tracks: !other || all || favourites,
            playlists: other || all || favourites,
            favourites_only: favourites,
        }
    }
}

/// Diffs `current` against the stored snapshot of `key`, reports the result
/// and replaces the stored snapshot.
///
/// Without a previous snapshot nothing is compared or reported and `None` is
/// returned; the snapshot is stored either way.
pub async fn compare_and_store(
    search: &impl TrackSearch,
    store: &SnapshotStore,
    key: &SnapshotKey,
    current: &Snapshot,
    report: impl FnOnce(&Resolution),
) -> Result<Option<Resolution>> {
    let resolution = match store.load(key).await? {
        Some(previous) => {
            let resolution = diff::resolve(&previous, current, search).await;
            report(&resolution);
            Some(resolution)
        }
        None => None,
    };

    store.save(key, current).await?;
    Ok(resolution)
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("saved tracks");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub async fn scan_saved_tracks(client: &SpotifyClient, store: &SnapshotStore) -> Result<()> {
    info!("Fetching Saved Tracks...");

    let pb = progress_bar();
    let tracks = client
        .saved_tracks(|fetched, total| {
            pb.set_length(total);
            pb.set_position(fetched);
        })
        .await;
    pb.finish_and_clear();
    let tracks = tracks?;

    let current = diff::snapshot_of(&tracks);
    compare_and_store(
        client,
        store,
        &SnapshotKey::saved_tracks(),
        &current,
        notify::report_saved_tracks,
    )
    .await?;

    success!("Updated song cache with the latest list");
    Ok(())
}

pub async fn scan_playlist(
    client: &SpotifyClient,
    store: &SnapshotStore,
    playlist: &Collection,
) -> Result<()> {
    info!("Processing Playlist: {}", playlist.name);

    let tracks = client.playlist_tracks(&playlist.id).await?;
    let current = diff::snapshot_of(&tracks);

    compare_and_store(
        client,
        store,
        &SnapshotKey::playlist(&playlist.name, &playlist.id),
        &current,
        |resolution| notify::report_playlist(&playlist.name, resolution),
    )
    .await?;

    println!();
    Ok(())
}

pub async fn scan_playlists(
    client: &SpotifyClient,
    store: &SnapshotStore,
    favourites: Option<&FavouriteSet>,
) -> Result<()> {
    let playlists = client.playlists().await?;

    if favourites.is_some() {
        info!("Searching for favourite playlists");
    }

    for playlist in selector::select(&playlists, favourites) {
        info!("ID: {}, Name: {}", playlist.id, playlist.name);
        scan_playlist(client, store, &playlist).await?;
    }

    Ok(())
}
