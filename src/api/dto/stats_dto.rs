//! Statistics DTOs (data points, bucket granularity, series queries)

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{serde_as, skip_serializing_none, DeserializeAs, SerializeAs};

/// Bucket width the backend aggregates a metric by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One time bucket of a metric.
///
/// `difference == increments - decrements` is guaranteed by the backend and
/// not re-checked here.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde_as(as = "FlexibleTimestamp")]
    pub start: DateTime<Utc>,
    #[serde_as(as = "FlexibleTimestamp")]
    pub end: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub increments: i64,
    #[serde(default)]
    pub decrements: i64,
    #[serde(default)]
    pub difference: i64,
}

/// Series query sent to `/stats/{metric}`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub granularity: Option<Granularity>,
}

impl StatsQuery {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            granularity: None,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }
}

/// The stats endpoint answers either a bare array or `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SeriesPayload {
    Wrapped { data: Vec<DataPoint> },
    Bare(Vec<DataPoint>),
}

impl SeriesPayload {
    pub fn into_points(self) -> Vec<DataPoint> {
        match self {
            SeriesPayload::Wrapped { data } => data,
            SeriesPayload::Bare(points) => points,
        }
    }
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a plain
/// `YYYY-MM-DD` date (midnight UTC). Always writes RFC 3339.
pub struct FlexibleTimestamp;

impl<'de> DeserializeAs<'de, DateTime<Utc>> for FlexibleTimestamp {
    fn deserialize_as<D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

impl SerializeAs<DateTime<Utc>> for FlexibleTimestamp {
    fn serialize_as<S>(source: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&source.to_rfc3339())
    }
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("unrecognized timestamp '{}'", raw))
}
