pub mod engine;
pub mod model;
pub mod store;

pub use engine::ProgressEngine;
pub use store::SessionStore;
