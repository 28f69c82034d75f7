//! Builds `object_store` backends from [`ObjectStoreConfig`].

use std::sync::Arc;

use configs::ObjectStoreConfig;
use object_store::{
    aws::AmazonS3Builder, azure::MicrosoftAzureBuilder, local::LocalFileSystem,
    memory::InMemory, ObjectStore,
};

use crate::errors::ServiceError;
use crate::objects::proxy::ObjectProxy;

/// Build the backend described by `cfg` and wrap it in an [`ObjectProxy`].
///
/// S3 and Azure builders start from the process environment (`AWS_*`,
/// `AZURE_STORAGE_*`), so credentials never need to live in the config file.
pub fn build_proxy(cfg: &ObjectStoreConfig) -> Result<ObjectProxy, ServiceError> {
    cfg.validate().map_err(|e| ServiceError::Config(e.to_string()))?;
    let store = build_store(cfg)?;
    tracing::info!(container = cfg.container_name(), backend = kind(cfg), "object store ready");
    Ok(ObjectProxy::new(store, cfg.container_name()))
}

fn build_store(cfg: &ObjectStoreConfig) -> Result<Arc<dyn ObjectStore>, ServiceError> {
    let store: Arc<dyn ObjectStore> = match cfg {
        ObjectStoreConfig::S3 { bucket, region, endpoint } => {
            let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
            if let Some(region) = region {
                builder = builder.with_region(region);
            }
            if let Some(endpoint) = endpoint {
                builder = builder
                    .with_endpoint(endpoint)
                    .with_allow_http(endpoint.starts_with("http://"));
            }
            Arc::new(builder.build().map_err(config_error)?)
        }
        ObjectStoreConfig::Azure { container, account, access_key } => {
            let mut builder = MicrosoftAzureBuilder::from_env().with_container_name(container);
            if let Some(account) = account {
                builder = builder.with_account(account);
            }
            if let Some(key) = access_key {
                builder = builder.with_access_key(key);
            }
            Arc::new(builder.build().map_err(config_error)?)
        }
        ObjectStoreConfig::Local { root } => {
            std::fs::create_dir_all(root).map_err(|e| {
                ServiceError::Config(format!("cannot create storage root {root}: {e}"))
            })?;
            Arc::new(LocalFileSystem::new_with_prefix(root).map_err(config_error)?)
        }
        ObjectStoreConfig::Memory { .. } => Arc::new(InMemory::new()),
    };
    Ok(store)
}

fn kind(cfg: &ObjectStoreConfig) -> &'static str {
    match cfg {
        ObjectStoreConfig::S3 { .. } => "s3",
        ObjectStoreConfig::Azure { .. } => "azure",
        ObjectStoreConfig::Local { .. } => "local",
        ObjectStoreConfig::Memory { .. } => "memory",
    }
}

fn config_error(e: object_store::Error) -> ServiceError {
    ServiceError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_starts_empty() {
        let cfg = ObjectStoreConfig::Memory { name: Some("scratch".into()) };
        let proxy = build_proxy(&cfg).unwrap();
        assert_eq!(proxy.container(), "scratch");
        assert!(proxy.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn local_backend_reads_files_under_root() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("course_objects_{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(root.join("docs")).await?;
        tokio::fs::write(root.join("docs/syllabus.txt"), "week 1: ownership").await?;

        let cfg = ObjectStoreConfig::Local { root: root.to_string_lossy().into_owned() };
        let proxy = build_proxy(&cfg)?;
        assert!(proxy.exists("docs/syllabus.txt").await?);
        assert!(!proxy.exists("docs/missing.txt").await?);
        assert_eq!(proxy.read_content("docs/syllabus.txt").await?, "week 1: ownership");
        assert_eq!(proxy.list_keys().await?, ["docs/syllabus.txt"]);

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[test]
    fn blank_bucket_is_a_config_error() {
        let cfg = ObjectStoreConfig::S3 { bucket: "".into(), region: None, endpoint: None };
        assert!(matches!(build_proxy(&cfg), Err(ServiceError::Config(_))));
    }
}
