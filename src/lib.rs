//! Request-orchestration core of the box office console: statistics
//! aggregation and remote tables over the ticketing backend.

pub mod api;
pub mod app_state;
pub mod core;
pub mod debug;
pub mod domain;
pub mod errors;
pub mod routes;

pub use errors::AppError;
