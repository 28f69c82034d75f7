pub mod course;
pub mod errors;

pub use course::{Course, CourseId, CourseInput};
