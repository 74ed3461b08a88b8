use std::{
    collections::BTreeMap,
    fmt,
    path::PathBuf,
};

use crate::{Error, Result, config, types::Snapshot, utils};

const SNAPSHOT_BASE_NAME: &str = "savedSongs";
const PLAYLIST_NAME_MAX_CHARS: usize = 32;

/// File stem identifying the snapshot of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey(String);

impl SnapshotKey {
    pub fn saved_tracks() -> Self {
        Self(SNAPSHOT_BASE_NAME.to_string())
    }

    /// `savedSongs-<first 32 chars of the sanitized name>-<id>`.
    pub fn playlist(name: &str, id: &str) -> Self {
        let name = utils::sanitize_file_component(utils::truncate_chars(
            name,
            PLAYLIST_NAME_MAX_CHARS,
        ));
        Self(format!(
            "{base}-{name}-{id}",
            base = SNAPSHOT_BASE_NAME,
            name = name,
            id = utils::sanitize_file_component(id)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory of JSON snapshot files, one per collection.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn default_location() -> Self {
        Self::new(config::snapshot_dir())
    }

    pub fn path(&self, key: &SnapshotKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Returns `Ok(None)` when no snapshot was ever written for `key`.
    pub async fn load(&self, key: &SnapshotKey) -> Result<Option<Snapshot>> {
        let path = self.path(key);
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };

        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| Error::decode(&path, e))?;
        Ok(Some(snapshot))
    }

    /// Replaces the snapshot of `key` as a whole.
    pub async fn save(&self, key: &SnapshotKey, snapshot: &Snapshot) -> Result<()> {
        async_fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::io(&self.root, e))?;

        let path = self.path(key);
        // sorted keys keep the file stable between runs
        let ordered: BTreeMap<&String, &String> = snapshot.iter().collect();
        let json = serde_json::to_string_pretty(&ordered).map_err(|e| Error::encode(&path, e))?;

        let tmp_path = path.with_extension("json.tmp");
        async_fs::write(&tmp_path, json)
            .await
            .map_err(|e| Error::io(&tmp_path, e))?;
        async_fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| Error::io(&path, e))
    }
}
