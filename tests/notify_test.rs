use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use spordiff::{
    cli::playlist_table,
    diff::Resolution,
    notify::{missing_lines, ring_bell, suggestion_lines},
    types::{Candidate, Collection},
};

fn resolution() -> Resolution {
    let mut missing = BTreeMap::new();
    missing.insert("t2".to_string(), "Song B by Y".to_string());
    missing.insert("t5".to_string(), "Song E by V".to_string());

    let mut suggestions = BTreeMap::new();
    suggestions.insert(
        "t2".to_string(),
        vec![
            Candidate {
                id: "t9".to_string(),
                display: "Song B (Remastered) by Y".to_string(),
            },
            Candidate {
                id: "t2".to_string(),
                display: "Song B by Y".to_string(),
            },
        ],
    );

    Resolution {
        missing,
        suggestions,
    }
}

#[test]
fn test_missing_lines_are_sorted_by_id() {
    assert_eq!(
        missing_lines(&resolution()),
        vec![
            "\t- ID: t2, Song: Song B by Y",
            "\t- ID: t5, Song: Song E by V",
        ]
    );
}

#[test]
fn test_suggestion_lines_flag_exact_match() {
    assert_eq!(
        suggestion_lines(&resolution()),
        vec![
            "For missing song (ID: t2): Song B by Y",
            "\t- ID: t9, Song: Song B (Remastered) by Y",
            "\t- ID: t2, Song: Song B by Y <--- match",
        ]
    );
}

#[test]
fn test_empty_resolution_has_no_lines() {
    let empty = Resolution::default();

    assert!(empty.is_empty());
    assert!(missing_lines(&empty).is_empty());
    assert!(suggestion_lines(&empty).is_empty());
}

#[test]
fn test_playlist_table_lists_id_and_name() {
    let table = playlist_table(&[
        Collection::new("p1", "Road Trip"),
        Collection::new("p2", "Focus"),
    ])
    .to_string();

    assert!(table.contains("id"));
    assert!(table.contains("name"));
    assert!(table.contains("p1"));
    assert!(table.contains("Road Trip"));
    assert!(table.contains("Focus"));
}

// Writer that only counts as written once flushed.
#[derive(Default)]
struct Terminal {
    pending: Vec<u8>,
    shown: Vec<u8>,
}

impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.shown.append(&mut self.pending);
        Ok(())
    }
}

#[test]
fn test_bell_is_flushed_immediately() {
    let mut terminal = Terminal::default();

    ring_bell(&mut terminal).unwrap();

    assert_eq!(terminal.shown, b"\x07");
    assert!(terminal.pending.is_empty());
}
