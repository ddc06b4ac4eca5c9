//! Shared domain services (time window and granularity resolution)

pub mod granularity;
