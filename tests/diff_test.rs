use std::{cell::RefCell, collections::HashMap, io, path::PathBuf};

use spordiff::{
    Error, Result,
    diff::{Resolution, TrackSearch, find_missing, resolve, snapshot_of},
    types::{Candidate, Snapshot, TrackInfo},
};

// Helper search answering from a fixed table; unknown queries fail.
struct FakeSearch {
    results: HashMap<String, Vec<TrackInfo>>,
    queries: RefCell<Vec<String>>,
}

impl FakeSearch {
    fn new() -> Self {
        Self {
            results: HashMap::new(),
            queries: RefCell::new(Vec::new()),
        }
    }

    fn with(mut self, query: &str, tracks: Vec<TrackInfo>) -> Self {
        self.results.insert(query.to_string(), tracks);
        self
    }
}

impl TrackSearch for FakeSearch {
    async fn search_tracks(&self, query: &str) -> Result<Vec<TrackInfo>> {
        self.queries.borrow_mut().push(query.to_string());
        self.results.get(query).cloned().ok_or_else(|| Error::Io {
            path: PathBuf::from("search"),
            source: io::Error::other("offline"),
        })
    }
}

fn track(id: &str, name: &str, artists: &[&str]) -> TrackInfo {
    TrackInfo {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
    }
}

fn snapshot(entries: &[(&str, &str)]) -> Snapshot {
    entries
        .iter()
        .map(|(id, display)| (id.to_string(), display.to_string()))
        .collect()
}

#[tokio::test]
async fn test_identical_snapshots_resolve_to_nothing() {
    let a = snapshot(&[("t1", "Song A by X"), ("t2", "Song B by Y")]);
    let search = FakeSearch::new();

    let resolution = resolve(&a, &a, &search).await;

    assert!(resolution.missing.is_empty());
    assert!(resolution.suggestions.is_empty());
    assert!(resolution.is_empty());
    assert!(search.queries.borrow().is_empty());
}

#[tokio::test]
async fn test_one_removed_key_is_reported() {
    let a = snapshot(&[("t1", "Song A by X"), ("t2", "Song B by Y"), ("t3", "Song C by Z")]);
    let mut b = a.clone();
    b.remove("t3");

    let resolution = resolve(&a, &b, &FakeSearch::new()).await;

    assert_eq!(resolution.missing.len(), 1);
    assert_eq!(resolution.missing.get("t3").map(String::as_str), Some("Song C by Z"));
}

#[tokio::test]
async fn test_resolve_leaves_inputs_untouched() {
    let previous = snapshot(&[("t1", "Song A by X"), ("t2", "Song B by Y")]);
    let current = snapshot(&[("t1", "Song A by X"), ("t4", "Song D by W")]);
    let previous_before = previous.clone();
    let current_before = current.clone();

    let search = FakeSearch::new().with("Song B by Y", vec![track("t9", "Song B", &["Y"])]);
    let _ = resolve(&previous, &current, &search).await;

    assert_eq!(previous, previous_before);
    assert_eq!(current, current_before);
}

#[tokio::test]
async fn test_missing_track_gets_search_suggestions() {
    let previous = snapshot(&[("t1", "Song A by X"), ("t2", "Song B by Y")]);
    let current = snapshot(&[("t1", "Song A by X")]);
    let search = FakeSearch::new().with(
        "Song B by Y",
        vec![track("t9", "Song B (Remastered)", &["Y"])],
    );

    let resolution = resolve(&previous, &current, &search).await;

    assert_eq!(
        resolution.missing.into_iter().collect::<Vec<_>>(),
        vec![("t2".to_string(), "Song B by Y".to_string())]
    );
    assert_eq!(
        resolution.suggestions.get("t2"),
        Some(&vec![Candidate {
            id: "t9".to_string(),
            display: "Song B (Remastered) by Y".to_string(),
        }])
    );
    assert_eq!(search.queries.borrow().as_slice(), ["Song B by Y"]);
}

#[tokio::test]
async fn test_failed_or_empty_search_is_a_soft_miss() {
    let previous = snapshot(&[("t1", "Gone by X"), ("t2", "Also Gone by Y")]);
    let current = Snapshot::new();
    // "Gone by X" returns nothing, "Also Gone by Y" is unknown and fails
    let search = FakeSearch::new().with("Gone by X", Vec::new());

    let resolution = resolve(&previous, &current, &search).await;

    assert_eq!(resolution.missing.len(), 2);
    assert!(resolution.suggestions.is_empty());
}

#[tokio::test]
async fn test_candidates_keep_search_order_without_duplicates() {
    let previous = snapshot(&[("t2", "Song B by Y")]);
    let search = FakeSearch::new().with(
        "Song B by Y",
        vec![
            track("t8", "Song B (Live)", &["Y"]),
            track("t2", "Song B", &["Y"]),
            track("t8", "Song B (Live)", &["Y"]),
            track("t7", "Song B", &["Y", "Z"]),
        ],
    );

    let resolution = resolve(&previous, &Snapshot::new(), &search).await;
    let candidates = &resolution.suggestions["t2"];

    let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["t8", "t2", "t7"]);
    assert_eq!(candidates[2].display, "Song B by Y, Z");
    assert!(Resolution::is_exact_match("t2", &candidates[1]));
    assert!(!Resolution::is_exact_match("t2", &candidates[0]));
}

#[test]
fn test_find_missing_ignores_added_tracks() {
    let previous = snapshot(&[("t1", "Song A by X")]);
    let current = snapshot(&[("t1", "Renamed by X"), ("t5", "New by Q")]);

    assert!(find_missing(&previous, &current).is_empty());
}

#[test]
fn test_snapshot_of_builds_display_strings() {
    let tracks = vec![
        track("t1", "Song A", &["X"]),
        track("t2", "Song B", &["Y", "Z"]),
    ];

    let snap = snapshot_of(&tracks);

    assert_eq!(snap.len(), 2);
    assert_eq!(snap["t1"], "Song A by X");
    assert_eq!(snap["t2"], "Song B by Y, Z");
}
