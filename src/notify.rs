use std::io::{self, Write};

use notify_rust::Notification;

use crate::{diff::Resolution, info, success, warning};

pub const NOTIFICATION_SUMMARY: &str = "Spotify Playlist Manager";
pub const SAVED_TRACKS_MISSING: &str =
    "The following songs are missing from your Saved Tracks list:";
pub const SAVED_TRACKS_COMPLETE: &str = "No songs are missing from your Saved Tracks list - yay";
const MATCH_INDICATOR: &str = " <--- match";

/// One line per missing track.
pub fn missing_lines(resolution: &Resolution) -> Vec<String> {
    resolution
        .missing
        .iter()
        .map(|(id, song)| format!("\t- ID: {}, Song: {}", id, song))
        .collect()
}

/// Header plus candidate lines for every missing track that has suggestions.
pub fn suggestion_lines(resolution: &Resolution) -> Vec<String> {
    let mut lines = Vec::new();
    for (id, candidates) in &resolution.suggestions {
        let song = resolution.missing.get(id).map(String::as_str).unwrap_or("");
        lines.push(format!("For missing song (ID: {}): {}", id, song));
        for candidate in candidates {
            let indicator = if Resolution::is_exact_match(id, candidate) {
                MATCH_INDICATOR
            } else {
                ""
            };
            lines.push(format!(
                "\t- ID: {}, Song: {}{}",
                candidate.id, candidate.display, indicator
            ));
        }
    }
    lines
}

fn print_resolution(header: &str, resolution: &Resolution) {
    warning!("{}", header);
    for line in missing_lines(resolution) {
        println!("{}", line);
    }

    if !resolution.suggestions.is_empty() {
        println!();
        info!("Search results for missing songs:");
        for line in suggestion_lines(resolution) {
            println!("{}", line);
        }
    }
}

/// Console report plus a desktop notification and a terminal bell.
pub fn report_saved_tracks(resolution: &Resolution) {
    let message = if resolution.is_empty() {
        success!("{}", SAVED_TRACKS_COMPLETE);
        SAVED_TRACKS_COMPLETE.to_string()
    } else {
        print_resolution(SAVED_TRACKS_MISSING, resolution);
        format!(
            "{}\n{}",
            SAVED_TRACKS_MISSING,
            missing_lines(resolution).join("\n")
        )
    };

    desktop_notify(&message);
}

/// Console-only report; one notification per playlist would be too noisy.
pub fn report_playlist(name: &str, resolution: &Resolution) {
    if resolution.is_empty() {
        success!("No songs are missing from your {} playlist - yay", name);
        return;
    }

    print_resolution("The following songs are missing from this playlist:", resolution);
}

pub fn desktop_notify(body: &str) {
    if let Err(e) = Notification::new()
        .summary(NOTIFICATION_SUMMARY)
        .body(body)
        .show()
    {
        warning!("Failed to show desktop notification: {}", e);
    }

    if let Err(e) = ring_bell(&mut io::stdout()) {
        warning!("Failed to ring the terminal bell: {}", e);
    }
}

/// Writes the BEL character and flushes so the bell sounds right away.
pub fn ring_bell(out: &mut impl Write) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}
