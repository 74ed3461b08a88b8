//! # CLI Module
//!
//! This module provides the command-line layer of spordiff. It ties together
//! configuration, authentication, the Spotify client, the snapshot store and
//! the reporting helpers.
//!
//! ## Data Flow
//!
//! ```text
//! credentials (env) → authenticate → SpotifyClient
//!     → fetch collection → load previous snapshot → diff + search
//!     → report → save snapshot
//! ```
//!
//! Collections are processed one after the other. The first failing request
//! aborts the run; snapshots already written for earlier collections stay.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spordiff          # Saved tracks only
//! spordiff -o       # Other playlists, not the saved tracks
//! spordiff -a       # Saved tracks and all playlists
//! spordiff -f       # Saved tracks and favourite playlists
//! spordiff -p       # List playlists and exit
//! ```

mod playlists;
mod scan;

pub use playlists::{playlist_table, print_playlists};
pub use scan::{ScanOptions, compare_and_store, scan_playlist, scan_playlists, scan_saved_tracks};

use crate::{
    Result, config,
    management::{FavouritesManager, SnapshotStore},
    spotify::{self, SpotifyClient},
    warning,
};

/// Runs one invocation: authenticate, then list playlists or scan.
pub async fn run(options: ScanOptions, print_only: bool) -> Result<()> {
    let credentials = config::credentials()?;
    let token_mgr = spotify::auth::authenticate(&credentials).await?;
    let client = SpotifyClient::new(credentials, token_mgr);

    if print_only {
        return print_playlists(&client).await;
    }

    let favourites = if options.favourites_only {
        let path = config::favourites_path();
        let favourites = FavouritesManager::new(&path).load().await?;
        if favourites.is_none() {
            warning!(
                "Favourites file {} not found, scanning all playlists.",
                path.display()
            );
        }
        favourites
    } else {
        None
    };

    let store = SnapshotStore::default_location();

    if options.saved_tracks {
        scan_saved_tracks(&client, &store).await?;
    }

    if options.playlists {
        scan_playlists(&client, &store, favourites.as_ref()).await?;
    }

    Ok(())
}
