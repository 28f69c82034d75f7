use std::sync::Arc;

use models::{Course, CourseId, CourseInput};
use tracing::{info, instrument};

use crate::courses::repository::CourseRepository;
use crate::errors::ServiceError;

/// Application service over a [`CourseRepository`].
/// Validates inputs before they reach the repository and turns absence into
/// [`ServiceError::NotFound`].
#[derive(Clone)]
pub struct CourseService {
    repo: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Vec<Course> {
        self.repo.list().await
    }

    pub async fn get(&self, id: CourseId) -> Result<Course, ServiceError> {
        self.repo.get(id).await.ok_or_else(|| ServiceError::course_not_found(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CourseInput) -> Result<Course, ServiceError> {
        input.validate()?;
        let course = self.repo.create(input).await;
        info!(course_id = course.id, "course_created");
        Ok(course)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: CourseId, input: CourseInput) -> Result<Course, ServiceError> {
        input.validate()?;
        let course = self
            .repo
            .update(id, input)
            .await
            .ok_or_else(|| ServiceError::course_not_found(id))?;
        info!(course_id = id, "course_updated");
        Ok(course)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: CourseId) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await {
            return Err(ServiceError::course_not_found(id));
        }
        info!(course_id = id, "course_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::courses::store::CourseStore;

    fn service() -> CourseService {
        CourseService::new(CourseStore::new())
    }

    #[tokio::test]
    async fn create_validates_before_storing() {
        let svc = service();
        let err = svc.create(CourseInput::new("", 10.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "Course name is required"));
        let err = svc.create(CourseInput::new("Java", 0.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(svc.list().await.is_empty());
    }

    #[tokio::test]
    async fn crud_lifecycle() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(CourseInput::new("Java", 99.99)).await?;
        assert_eq!(created.id, 1);
        assert_eq!(svc.get(1).await?, created);

        let updated = svc.update(1, CourseInput::new("Java2", 10.0)).await?;
        assert_eq!(updated.name, "Java2");
        assert_eq!(updated.id, 1);

        svc.delete(1).await?;
        assert!(matches!(svc.get(1).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let svc = service();
        let err = svc.update(5, CourseInput::new("Java", 1.0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Course not found with id: 5");
        assert!(matches!(svc.delete(5).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalid_update_on_missing_id_reports_validation_first() {
        let svc = service();
        let err = svc.update(5, CourseInput::new(" ", 1.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
