//! Object store doubles for tests.

use std::fmt;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use object_store::{
    path::Path, Error, GetOptions, GetResult, ListResult, MultipartUpload, ObjectMeta,
    ObjectStore, PutMultipartOpts, PutOptions, PutPayload, PutResult, Result,
};

/// Backend that is never reachable: every call fails with a generic
/// (non not-found) error.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl fmt::Display for FailingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FailingStore")
    }
}

fn unreachable_backend() -> Error {
    Error::Generic { store: "FailingStore", source: "connection refused".into() }
}

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put_opts(&self, _: &Path, _: PutPayload, _: PutOptions) -> Result<PutResult> {
        Err(unreachable_backend())
    }

    async fn put_multipart_opts(
        &self,
        _: &Path,
        _: PutMultipartOpts,
    ) -> Result<Box<dyn MultipartUpload>> {
        Err(unreachable_backend())
    }

    async fn get_opts(&self, _: &Path, _: GetOptions) -> Result<GetResult> {
        Err(unreachable_backend())
    }

    async fn delete(&self, _: &Path) -> Result<()> {
        Err(unreachable_backend())
    }

    fn list(&self, _: Option<&Path>) -> BoxStream<'_, Result<ObjectMeta>> {
        stream::once(async { Err(unreachable_backend()) }).boxed()
    }

    async fn list_with_delimiter(&self, _: Option<&Path>) -> Result<ListResult> {
        Err(unreachable_backend())
    }

    async fn copy(&self, _: &Path, _: &Path) -> Result<()> {
        Err(unreachable_backend())
    }

    async fn copy_if_not_exists(&self, _: &Path, _: &Path) -> Result<()> {
        Err(unreachable_backend())
    }
}
