use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::kv::{keys, KvStore};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RemoteCarStatus {
    Available,
    Maintenance,
    Inactive,
}

/// A car entry as published in the remote list. Deliberately looser than the
/// local `Car` model: the feed is maintained by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteCar {
    pub id: String,
    pub name: String,
    pub plate: String,
    pub seats: i32,
    pub base: String,
    pub status: RemoteCarStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCarList {
    pub updated_at: String,
    pub cars: Vec<RemoteCar>,
}

/// Best-effort fetch of the published car list with a local-cache fallback.
///
/// A successful fetch refreshes the cache; any failure (network, HTTP status,
/// decode) falls back to the last cached copy. Callers never see an error,
/// only `None` when neither the network nor the cache has anything.
pub struct RemoteCarSource {
    client: reqwest::Client,
    url: String,
    store: KvStore,
}

impl RemoteCarSource {
    pub fn new(url: impl Into<String>, store: KvStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            store,
        }
    }

    pub async fn load(&self) -> Option<RemoteCarList> {
        match self.fetch().await {
            Ok(list) => {
                if let Err(err) = self.store.put(keys::REMOTE_CARS_CACHE, &list).await {
                    warn!(%err, "failed to cache remote car list");
                }
                Some(list)
            }
            Err(err) => {
                warn!(%err, "remote car list unavailable, using cache");
                self.store.get(keys::REMOTE_CARS_CACHE).await
            }
        }
    }

    async fn fetch(&self) -> Result<RemoteCarList, reqwest::Error> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_url_falls_back_to_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(dir.path()).await.unwrap();

        let cached = RemoteCarList {
            updated_at: "2024-06-01T00:00:00Z".to_string(),
            cars: vec![RemoteCar {
                id: "r1".to_string(),
                name: "Toyota Land Cruiser".to_string(),
                plate: "DXB-1234".to_string(),
                seats: 7,
                base: "Dubai".to_string(),
                status: RemoteCarStatus::Available,
                tags: vec!["SUV".to_string()],
            }],
        };
        store.put(keys::REMOTE_CARS_CACHE, &cached).await.unwrap();

        // Nothing listens on this port.
        let source = RemoteCarSource::new("http://127.0.0.1:1/cars.json", store);
        let list = source.load().await.unwrap();
        assert_eq!(list.cars.len(), 1);
        assert_eq!(list.cars[0].plate, "DXB-1234");
    }

    #[tokio::test]
    async fn test_unreachable_url_without_cache_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(dir.path()).await.unwrap();

        let source = RemoteCarSource::new("http://127.0.0.1:1/cars.json", store);
        assert!(source.load().await.is_none());
    }

    #[test]
    fn test_payload_shape_matches_published_feed() {
        let json = r#"{
            "updatedAt": "2024-06-01T00:00:00Z",
            "cars": [
                {"id": "r1", "name": "Nissan Patrol", "plate": "DXB-5678",
                 "seats": 7, "base": "Dubai", "status": "available"}
            ]
        }"#;

        let list: RemoteCarList = serde_json::from_str(json).unwrap();
        assert_eq!(list.cars[0].status, RemoteCarStatus::Available);
        assert!(list.cars[0].tags.is_empty());
    }
}
