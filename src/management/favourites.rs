use std::path::PathBuf;

use crate::{Error, Result, types::FavouriteSet};

/// Reads the favourites allow-list, a JSON object of playlist ID to label.
pub struct FavouritesManager {
    path: PathBuf,
}

impl FavouritesManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `Ok(None)` when the file does not exist, meaning "no filter".
    pub async fn load(&self) -> Result<Option<FavouriteSet>> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        let favourites: FavouriteSet =
            serde_json::from_str(&content).map_err(|e| Error::decode(&self.path, e))?;
        Ok(Some(favourites))
    }
}
