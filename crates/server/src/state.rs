use std::sync::Arc;

use configs::AppConfig;
use service::{
    courses::{CourseService, CourseStore},
    errors::ServiceError,
    objects::{build_proxy, ObjectProxy},
};

use crate::handlers::objects::ObjectFlavor;
use crate::trigger::RouteTable;

/// Shared state handed to every handler. Cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub courses: CourseService,
    pub s3: Option<Arc<ObjectProxy>>,
    pub blob: Option<Arc<ObjectProxy>>,
    pub routes: Arc<RouteTable>,
}

impl ServerState {
    pub fn new(courses: CourseService) -> Self {
        Self { courses, s3: None, blob: None, routes: Arc::new(RouteTable::standard()) }
    }

    pub fn with_s3(mut self, proxy: ObjectProxy) -> Self {
        self.s3 = Some(Arc::new(proxy));
        self
    }

    pub fn with_blob(mut self, proxy: ObjectProxy) -> Self {
        self.blob = Some(Arc::new(proxy));
        self
    }

    /// Course store (optionally seeded) plus whichever object stores are configured.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, ServiceError> {
        let store = if cfg.courses.seed_samples {
            CourseStore::with_samples()
        } else {
            CourseStore::new()
        };
        let mut state = Self::new(CourseService::new(store));
        if let Some(s3) = &cfg.storage.s3 {
            state = state.with_s3(build_proxy(s3)?);
        }
        if let Some(blob) = &cfg.storage.blob {
            state = state.with_blob(build_proxy(blob)?);
        }
        Ok(state)
    }

    pub fn object_proxy(&self, flavor: ObjectFlavor) -> Option<&ObjectProxy> {
        match flavor {
            ObjectFlavor::S3 => self.s3.as_deref(),
            ObjectFlavor::Blob => self.blob.as_deref(),
        }
    }
}
