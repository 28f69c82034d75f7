pub mod repository;
pub mod service;
pub mod store;

pub use repository::CourseRepository;
pub use service::CourseService;
pub use store::CourseStore;
