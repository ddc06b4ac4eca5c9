//! Shared domain types

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::stats_dto::Granularity;

/// A resolved statistics window: concrete bounds plus the bucket width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub granularity: Granularity,
}
