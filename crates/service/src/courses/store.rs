use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use models::{Course, CourseId, CourseInput};
use tokio::sync::RwLock;

/// In-memory course collection kept in insertion order.
///
/// Ids come from a monotonic counter and are never handed out twice, even after
/// the course holding one is deleted. The counter is bumped while the write
/// lock is held so ids grow in insertion order.
pub struct CourseStore {
    inner: RwLock<Vec<Course>>,
    next_id: AtomicI64,
}

impl CourseStore {
    /// Empty store; the first course gets id 1.
    pub fn new() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Vec::new()), next_id: AtomicI64::new(1) })
    }

    /// Store pre-filled with the three sample courses; the first create gets id 4.
    pub fn with_samples() -> Arc<Self> {
        let samples = vec![
            Course { id: 1, name: "Java Basics".into(), price: 99.99 },
            Course { id: 2, name: "Spring Boot".into(), price: 149.99 },
            Course { id: 3, name: "Azure Functions".into(), price: 199.99 },
        ];
        Arc::new(Self { inner: RwLock::new(samples), next_id: AtomicI64::new(4) })
    }

    pub async fn list(&self) -> Vec<Course> {
        let courses = self.inner.read().await;
        courses.clone()
    }

    pub async fn get(&self, id: CourseId) -> Option<Course> {
        let courses = self.inner.read().await;
        courses.iter().find(|c| c.id == id).cloned()
    }

    pub async fn create(&self, input: CourseInput) -> Course {
        let mut courses = self.inner.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let course = Course::from_input(id, input);
        courses.push(course.clone());
        course
    }

    pub async fn update(&self, id: CourseId, input: CourseInput) -> Option<Course> {
        let mut courses = self.inner.write().await;
        let existing = courses.iter_mut().find(|c| c.id == id)?;
        existing.apply(input);
        Some(existing.clone())
    }

    pub async fn delete(&self, id: CourseId) -> bool {
        let mut courses = self.inner.write().await;
        let before = courses.len();
        courses.retain(|c| c.id != id);
        courses.len() != before
    }
}
