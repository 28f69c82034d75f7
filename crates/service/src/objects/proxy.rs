use std::{sync::Arc, time::Instant};

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{path::Path, Error as ObjectStoreError, ObjectStore};

use crate::errors::ServiceError;

/// Read-only view over one bucket/container of an object store.
///
/// Nothing is cached: every call goes to the backend.
#[derive(Clone)]
pub struct ObjectProxy {
    store: Arc<dyn ObjectStore>,
    container: String,
}

impl ObjectProxy {
    pub fn new(store: Arc<dyn ObjectStore>, container: impl Into<String>) -> Self {
        Self { store, container: container.into() }
    }

    /// Bucket or container name this proxy reads from.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// `Ok(false)` only when the backend confirms the object is absent; any other
    /// failure is returned as [`ServiceError::Upstream`].
    pub async fn exists(&self, key: &str) -> Result<bool, ServiceError> {
        let location = parse_key(key)?;
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => {
                tracing::error!(error = %e, container = %self.container, key, "object head failed");
                Err(upstream("check existence of", key, e))
            }
        }
    }

    /// Fetch the whole object and decode it as UTF-8 text (invalid sequences are
    /// replaced).
    pub async fn read_content(&self, key: &str) -> Result<String, ServiceError> {
        let location = parse_key(key)?;
        let start = Instant::now();
        let bytes = self.fetch(&location).await.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => {
                ServiceError::NotFound(format!("object not found: {key}"))
            }
            other => {
                tracing::error!(
                    error = %other,
                    container = %self.container,
                    key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "object read failed"
                );
                upstream("read", key, other)
            }
        })?;

        tracing::debug!(
            container = %self.container,
            key,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "object read"
        );
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch(&self, location: &Path) -> object_store::Result<Bytes> {
        self.store.get(location).await?.bytes().await
    }

    /// Every key in the container, sorted. The full listing is materialized.
    pub async fn list_keys(&self) -> Result<Vec<String>, ServiceError> {
        let mut keys: Vec<String> = self
            .store
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, container = %self.container, "object listing failed");
                ServiceError::Upstream(format!("list objects in {}: {e}", self.container))
            })?;
        keys.sort_unstable();
        Ok(keys)
    }
}

fn parse_key(key: &str) -> Result<Path, ServiceError> {
    if key.trim().is_empty() {
        return Err(ServiceError::Validation("object key is required".into()));
    }
    Path::parse(key)
        .map_err(|e| ServiceError::Validation(format!("invalid object key `{key}`: {e}")))
}

fn upstream(action: &str, key: &str, e: ObjectStoreError) -> ServiceError {
    ServiceError::Upstream(format!("{action} `{key}`: {e}"))
}
