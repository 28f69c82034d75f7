use async_trait::async_trait;
use models::{Course, CourseId, CourseInput};

use super::store::CourseStore;

/// Storage seam for courses. Every operation is total: absence is reported as
/// `None`/`false`, never as an error.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list(&self) -> Vec<Course>;
    async fn get(&self, id: CourseId) -> Option<Course>;
    async fn create(&self, input: CourseInput) -> Course;
    async fn update(&self, id: CourseId, input: CourseInput) -> Option<Course>;
    async fn delete(&self, id: CourseId) -> bool;
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn list(&self) -> Vec<Course> {
        CourseStore::list(self).await
    }

    async fn get(&self, id: CourseId) -> Option<Course> {
        CourseStore::get(self, id).await
    }

    async fn create(&self, input: CourseInput) -> Course {
        CourseStore::create(self, input).await
    }

    async fn update(&self, id: CourseId, input: CourseInput) -> Option<Course> {
        CourseStore::update(self, id, input).await
    }

    async fn delete(&self, id: CourseId) -> bool {
        CourseStore::delete(self, id).await
    }
}
