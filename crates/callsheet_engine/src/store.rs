use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use reqwest::header::{ETAG, IF_MATCH};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Logical datasets the backend keys blobs by, per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Jobs,
    Clients,
    Settings,
}

impl Dataset {
    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Jobs => "jobs",
            Dataset::Clients => "clients",
            Dataset::Settings => "settings",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque write token (an HTTP ETag for the remote store). Passing the token
/// observed at read time back into `put` turns the write into a
/// compare-and-swap: a concurrent writer surfaces as [`StoreError::Conflict`]
/// instead of being silently clobbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub value: Value,
    /// Absent when the backend does not report one; writes then proceed
    /// unconditionally.
    pub version: Option<Version>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),
    #[error("dataset {dataset} was changed by another writer")]
    Conflict { dataset: Dataset },
    #[error("store returned http status {0}")]
    HttpStatus(u16),
    #[error("store request failed: {0}")]
    Network(String),
    #[error("store payload could not be decoded: {0}")]
    Decode(String),
}

/// Key-value blob store keyed by actor id and dataset name. Best-effort:
/// no transactionality beyond per-blob conditional writes.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, actor_id: &str, dataset: Dataset) -> Result<Option<Blob>, StoreError>;
    async fn put(
        &self,
        actor_id: &str,
        dataset: Dataset,
        value: &Value,
        expected: Option<&Version>,
    ) -> Result<Option<Version>, StoreError>;
    async fn delete(&self, actor_id: &str, dataset: Dataset) -> Result<(), StoreError>;
}

/// REST client for the backend's per-actor blob endpoint
/// (`{base}/data/{actor_id}/{dataset}`), using ETag/If-Match for the
/// conditional writes.
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    base: Url,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpBlobStore {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, StoreError> {
        let base = Url::parse(base_url).map_err(|err| StoreError::InvalidConfig(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| StoreError::Network(err.to_string()))?;
        Ok(Self {
            base,
            token,
            client,
        })
    }

    fn object_url(&self, actor_id: &str, dataset: Dataset) -> Result<Url, StoreError> {
        self.base
            .join(&format!("data/{actor_id}/{dataset}"))
            .map_err(|err| StoreError::InvalidConfig(err.to_string()))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for HttpBlobStore {
    async fn get(&self, actor_id: &str, dataset: Dataset) -> Result<Option<Blob>, StoreError> {
        let url = self.object_url(actor_id, dataset)?;
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }

        let version = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(|value| Version(value.to_string()));
        let value = response
            .json::<Value>()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        Ok(Some(Blob { value, version }))
    }

    async fn put(
        &self,
        actor_id: &str,
        dataset: Dataset,
        value: &Value,
        expected: Option<&Version>,
    ) -> Result<Option<Version>, StoreError> {
        let url = self.object_url(actor_id, dataset)?;
        let mut request = self.authorized(self.client.put(url)).json(value);
        if let Some(Version(etag)) = expected {
            request = request.header(IF_MATCH, etag);
        }
        let response = request
            .send()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;

        if response.status() == StatusCode::PRECONDITION_FAILED {
            return Err(StoreError::Conflict { dataset });
        }
        if !response.status().is_success() {
            return Err(StoreError::HttpStatus(response.status().as_u16()));
        }

        Ok(response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(|value| Version(value.to_string())))
    }

    async fn delete(&self, actor_id: &str, dataset: Dataset) -> Result<(), StoreError> {
        let url = self.object_url(actor_id, dataset)?;
        let response = self
            .authorized(self.client.delete(url))
            .send()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;

        // Deleting an absent blob is not a failure.
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }
        Err(StoreError::HttpStatus(response.status().as_u16()))
    }
}

/// In-memory store with counter versions. Used by tests and as a stand-in
/// when no backend is configured.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: Mutex<HashMap<(String, Dataset), (Value, u64)>>,
    next_version: Mutex<u64>,
    fail_writes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `put` fail with a transport error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    fn bump_version(&self) -> u64 {
        let mut next = self.next_version.lock().expect("version lock");
        *next += 1;
        *next
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, actor_id: &str, dataset: Dataset) -> Result<Option<Blob>, StoreError> {
        let entries = self.entries.lock().expect("store lock");
        Ok(entries
            .get(&(actor_id.to_string(), dataset))
            .map(|(value, version)| Blob {
                value: value.clone(),
                version: Some(Version(version.to_string())),
            }))
    }

    async fn put(
        &self,
        actor_id: &str,
        dataset: Dataset,
        value: &Value,
        expected: Option<&Version>,
    ) -> Result<Option<Version>, StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Network("injected write failure".to_string()));
        }
        let version = self.bump_version();
        let mut entries = self.entries.lock().expect("store lock");
        let key = (actor_id.to_string(), dataset);
        if let Some(Version(expected)) = expected {
            let current = entries.get(&key).map(|(_, version)| version.to_string());
            if current.as_deref() != Some(expected.as_str()) {
                return Err(StoreError::Conflict { dataset });
            }
        }
        entries.insert(key, (value.clone(), version));
        Ok(Some(Version(version.to_string())))
    }

    async fn delete(&self, actor_id: &str, dataset: Dataset) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store lock");
        entries.remove(&(actor_id.to_string(), dataset));
        Ok(())
    }
}
