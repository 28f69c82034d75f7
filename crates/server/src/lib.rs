pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;
pub mod trigger;

pub use startup::{build_app, run};
