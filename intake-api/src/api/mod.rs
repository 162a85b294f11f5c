//! HTTP API handlers for intake-api

pub mod forms;
pub mod health;

pub use forms::{create_form, list_forms, update_form};
pub use health::health_routes;
