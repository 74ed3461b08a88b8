//! Comparison of two snapshots of the same collection.
//!
//! [`resolve`] lists the tracks of the previous snapshot that are gone from
//! the current one and asks a [`TrackSearch`] for possible replacements. The
//! results are only reported, nothing is written back to Spotify.

use std::collections::BTreeMap;

use crate::{
    Result,
    types::{Candidate, Snapshot, TrackId, TrackInfo},
    warning,
};

/// Free-text track search used to suggest replacements.
#[allow(async_fn_in_trait)]
pub trait TrackSearch {
    async fn search_tracks(&self, query: &str) -> Result<Vec<TrackInfo>>;
}

/// Outcome of comparing two snapshots, ordered by track ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Tracks of the previous snapshot absent from the current one.
    pub missing: BTreeMap<TrackId, String>,
    /// Search candidates per missing track, in the order Spotify returned them.
    /// Tracks whose search failed or came back empty have no entry.
    pub suggestions: BTreeMap<TrackId, Vec<Candidate>>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    /// True when a candidate carries the very ID of the missing track.
    pub fn is_exact_match(missing_id: &str, candidate: &Candidate) -> bool {
        candidate.id == missing_id
    }
}

/// Snapshot of freshly fetched tracks; a repeated ID keeps its last display.
pub fn snapshot_of(tracks: &[TrackInfo]) -> Snapshot {
    tracks
        .iter()
        .map(|track| (track.id.clone(), track.display()))
        .collect()
}

/// Track IDs present in `previous` but not in `current`.
pub fn find_missing(previous: &Snapshot, current: &Snapshot) -> BTreeMap<TrackId, String> {
    previous
        .iter()
        .filter(|(id, _)| !current.contains_key(*id))
        .map(|(id, display)| (id.clone(), display.clone()))
        .collect()
}

pub async fn resolve(
    previous: &Snapshot,
    current: &Snapshot,
    search: &impl TrackSearch,
) -> Resolution {
    let missing = find_missing(previous, current);
    let mut suggestions = BTreeMap::new();

    for (id, display) in &missing {
        match search.search_tracks(display).await {
            Ok(tracks) => {
                let candidates = to_candidates(tracks);
                if !candidates.is_empty() {
                    suggestions.insert(id.clone(), candidates);
                }
            }
            Err(e) => warning!("Search for \"{}\" failed: {}", display, e),
        }
    }

    Resolution {
        missing,
        suggestions,
    }
}

// keeps the first occurrence of every ID
fn to_candidates(tracks: Vec<TrackInfo>) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::with_capacity(tracks.len());
    for track in tracks {
        if candidates.iter().any(|c| c.id == track.id) {
            continue;
        }
        candidates.push(Candidate {
            display: track.display(),
            id: track.id,
        });
    }
    candidates
}
