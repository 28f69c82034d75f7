//! Service layer: the in-memory course store and the object storage proxy.
//! - `courses` owns the course collection and its business rules.
//! - `objects` wraps an `object_store` backend (S3, Azure Blob, local, memory).

pub mod courses;
pub mod errors;
pub mod objects;

#[cfg(any(test, feature = "test-util"))]
pub mod test_support;
