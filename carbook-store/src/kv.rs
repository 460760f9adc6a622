use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::warn;

/// Fixed document keys. One JSON document per collection, the same layout the
/// original on-device store used.
pub mod keys {
    pub const CURRENT_USER: &str = "current_user";
    pub const USERS: &str = "users";
    pub const CARS: &str = "cars";
    pub const BOOKINGS: &str = "bookings";
    pub const RIDE_MATES: &str = "ride_mates";
    pub const HANDOVERS: &str = "handovers";
    pub const ISSUES: &str = "issues";
    pub const INITIALIZED: &str = "initialized";
    pub const REMOTE_CARS_CACHE: &str = "cars_remote_cache_v1";

    pub const ALL: &[&str] = &[
        CURRENT_USER,
        USERS,
        CARS,
        BOOKINGS,
        RIDE_MATES,
        HANDOVERS,
        ISSUES,
        INITIALIZED,
        REMOTE_CARS_CACHE,
    ];
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// File-backed JSON key-value store: one document per key under a root
/// directory. Reads never fail the caller; a missing, unreadable or
/// unparsable document reads as absent.
#[derive(Clone)]
pub struct KvStore {
    root: PathBuf,
}

impl KvStore {
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match fs::read(self.path_for(key)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(key, %err, "unreadable store document, treating as absent");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "corrupt store document, treating as absent");
                None
            }
        }
    }

    /// Serialize and persist. Writes go through a sibling temp file and a
    /// rename so a crash never leaves a half-written document behind.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.path_for(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));

        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Remove every fixed key. The reset path for a device.
    pub async fn clear(&self) -> StoreResult<()> {
        for key in keys::ALL {
            self.remove(key).await?;
        }
        Ok(())
    }
}
