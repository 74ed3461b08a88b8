use tabled::Table;

use crate::{
    Result,
    spotify::SpotifyClient,
    types::{Collection, PlaylistTableRow},
};

pub fn playlist_table(playlists: &[Collection]) -> Table {
    let rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .map(|p| PlaylistTableRow {
            id: p.id.clone(),
            name: p.name.clone(),
        })
        .collect();

    Table::new(rows)
}

/// Prints every playlist of the user, unfiltered.
pub async fn print_playlists(client: &SpotifyClient) -> Result<()> {
    let playlists = client.playlists().await?;
    println!("{}", playlist_table(&playlists));
    Ok(())
}
