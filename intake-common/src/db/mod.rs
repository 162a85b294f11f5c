//! Database layer shared by the intake services

pub mod init;
pub mod migrations;
pub mod models;

pub use init::{create_schema, init_database};
pub use migrations::run_migrations;
