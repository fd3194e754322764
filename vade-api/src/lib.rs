pub mod activity;
pub mod client;

pub use activity::ActivityLogger;
pub use client::{ApiClient, Unauthorized};
