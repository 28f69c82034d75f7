use anyhow::{anyhow, Result};
use common::utils::logging::LogFormat;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub courses: CoursesConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CoursesConfig {
    /// Start with the three sample courses (ids 1..=3).
    #[serde(default)]
    pub seed_samples: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub s3: Option<ObjectStoreConfig>,
    #[serde(default)]
    pub blob: Option<ObjectStoreConfig>,
}

/// Backend selection for one object store proxy.
///
/// ```toml
/// [storage.s3]
/// kind = "s3"
/// bucket = "course-data"
/// region = "eu-west-1"
///
/// [storage.blob]
/// kind = "azure"
/// container = "course-data"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectStoreConfig {
    S3 {
        bucket: String,
        #[serde(default)]
        region: Option<String>,
        /// Custom endpoint for S3-compatible providers (MinIO, R2, ...).
        #[serde(default)]
        endpoint: Option<String>,
    },
    Azure {
        container: String,
        #[serde(default)]
        account: Option<String>,
        #[serde(default)]
        access_key: Option<String>,
    },
    Local {
        root: String,
    },
    Memory {
        #[serde(default)]
        name: Option<String>,
    },
}

impl ObjectStoreConfig {
    /// Bucket, container or root the proxy reports in listings.
    pub fn container_name(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::Azure { container, .. } => container,
            Self::Local { root } => root,
            Self::Memory { name } => name.as_deref().unwrap_or("memory"),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (field, value) = match self {
            Self::S3 { bucket, .. } => ("bucket", bucket.as_str()),
            Self::Azure { container, .. } => ("container", container.as_str()),
            Self::Local { root } => ("root", root.as_str()),
            Self::Memory { .. } => return Ok(()),
        };
        if value.trim().is_empty() {
            return Err(anyhow!("storage {field} must not be empty"));
        }
        Ok(())
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); fall back to defaults plus env vars
    /// when the file is missing.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_from(|key| std::env::var(key).ok())
    }

    /// Same as [`normalize_and_validate`](Self::normalize_and_validate) with an
    /// explicit variable lookup.
    pub fn normalize_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.server.normalize(&lookup)?;
        self.storage.normalize(&lookup);
        self.storage.validate()?;
        self.log_format_from(&lookup)?;
        Ok(())
    }

    /// `logging.format`, else the `LOG_FORMAT` env var, else compact.
    pub fn log_format(&self) -> Result<LogFormat> {
        self.log_format_from(&|key: &str| std::env::var(key).ok())
    }

    fn log_format_from<F>(&self, lookup: &F) -> Result<LogFormat>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = self.logging.format.clone().or_else(|| lookup("LOG_FORMAT"));
        match raw {
            Some(s) => Ok(s.parse()?),
            None => Ok(LogFormat::default()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if let Some(raw) = lookup("SERVER_PORT") {
            self.port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| anyhow!("SERVER_PORT must be a port number, got `{raw}`"))?;
        }
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.s3.is_none() {
            if let Some(bucket) = lookup("S3_BUCKET_NAME").filter(|b| !b.trim().is_empty()) {
                self.s3 = Some(ObjectStoreConfig::S3 {
                    bucket,
                    region: lookup("AWS_REGION"),
                    endpoint: lookup("S3_ENDPOINT"),
                });
            }
        }
        if self.blob.is_none() {
            if let Some(container) =
                lookup("AZURE_STORAGE_CONTAINER_NAME").filter(|c| !c.trim().is_empty())
            {
                self.blob = Some(ObjectStoreConfig::Azure {
                    container,
                    account: lookup("AZURE_STORAGE_ACCOUNT_NAME"),
                    access_key: lookup("AZURE_STORAGE_ACCOUNT_KEY"),
                });
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        for cfg in [&self.s3, &self.blob].into_iter().flatten() {
            cfg.validate()?;
        }
        Ok(())
    }
}
