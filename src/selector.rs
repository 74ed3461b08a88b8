use crate::types::{Collection, FavouriteSet};

/// Names that end the scan: nothing after them is considered.
pub const STOP_NAMES: [&str; 2] = ["Discover Weekly", "Listen Later"];

/// Suffix of the playlists Spotify generates from a seed ("... Radio").
pub const RADIO_SUFFIX: &str = "Radio";

pub fn is_stop_name(name: &str) -> bool {
    STOP_NAMES.contains(&name)
}

/// Radio playlists are skipped; a name that is only the suffix is kept.
pub fn is_radio(name: &str) -> bool {
    name.len() > RADIO_SUFFIX.len() && name.ends_with(RADIO_SUFFIX)
}

/// Playlists to scan, in fetch order.
///
/// With `favourites`, playlists whose ID is not listed are skipped before the
/// name rules apply. The first playlist named like [`STOP_NAMES`] ends the
/// selection, everything after it is dropped too.
pub fn select(all: &[Collection], favourites: Option<&FavouriteSet>) -> Vec<Collection> {
    let mut selected = Vec::new();

    for playlist in all {
        if let Some(favourites) = favourites {
            if !favourites.contains_key(&playlist.id) {
                continue;
            }
        }

        if is_stop_name(&playlist.name) {
            break;
        }

        if is_radio(&playlist.name) {
            continue;
        }

        selected.push(playlist.clone());
    }

    selected
}
