pub mod backend;
pub mod proxy;

pub use backend::build_proxy;
pub use proxy::ObjectProxy;
