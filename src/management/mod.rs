mod auth;
mod favourites;
mod snapshot;

pub use auth::TokenManager;
pub use favourites::FavouritesManager;
pub use snapshot::SnapshotKey;
pub use snapshot::SnapshotStore;
