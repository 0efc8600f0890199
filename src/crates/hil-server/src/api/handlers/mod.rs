//! API endpoint handlers

pub mod health;
pub mod sessions;
pub mod workflow;

pub use health::health;
pub use sessions::list_sessions;
pub use workflow::{advance_workflow, get_workflow};
