use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::api::dto::stats_dto::{Granularity, StatsQuery};
use crate::domain::common::model::TimeWindow;

pub const DEFAULT_WINDOW_DAYS: i64 = 30;

pub fn resolve_time_window(q: &StatsQuery) -> TimeWindow {
    resolve_time_window_at(q, Utc::now())
}

/// Same as [`resolve_time_window`] with an explicit "now".
pub fn resolve_time_window_at(q: &StatsQuery, now: DateTime<Utc>) -> TimeWindow {
    let end = q.end.unwrap_or(now);
    let start = q
        .start
        .unwrap_or_else(|| end - Duration::days(DEFAULT_WINDOW_DAYS));

    let granularity = match q.granularity {
        Some(g) => {
            // Soft validation: log but never fail
            if let Err(err) = validate_granularity(start, end, g) {
                warn!("Invalid granularity override {:?}: {}", g, err);
                determine_granularity(start, end)
            } else {
                g
            }
        }
        None => determine_granularity(start, end),
    };

    TimeWindow { start, end, granularity }
}

pub fn determine_granularity(start: DateTime<Utc>, end: DateTime<Utc>) -> Granularity {
    let diff = end - start;

    if diff <= Duration::days(2) {
        Granularity::Hour
    } else if diff <= Duration::days(60) {
        Granularity::Day
    } else if diff <= Duration::days(365) {
        Granularity::Week
    } else {
        Granularity::Month
    }
}

pub fn validate_granularity(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    granularity: Granularity,
) -> Result<(), String> {
    let diff = end - start;

    if diff < Duration::zero() {
        return Err("window end is before its start".into());
    }

    match granularity {
        Granularity::Hour => {
            if diff > Duration::days(7) {
                return Err("hour granularity cannot be used for ranges > 7 days".into());
            }
        }
        Granularity::Day => {
            if diff > Duration::days(366) {
                return Err("day granularity cannot be used for ranges > 366 days".into());
            }
        }
        Granularity::Week | Granularity::Month => { /* always allowed */ }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn granularity_follows_window_length() {
        let start = at(2023, 1, 1);
        assert_eq!(determine_granularity(start, start + Duration::hours(36)), Granularity::Hour);
        assert_eq!(determine_granularity(start, at(2023, 2, 1)), Granularity::Day);
        assert_eq!(determine_granularity(start, at(2023, 9, 1)), Granularity::Week);
        assert_eq!(determine_granularity(start, at(2025, 1, 1)), Granularity::Month);
    }

    #[test]
    fn defaults_to_last_thirty_days() {
        let now = at(2023, 6, 30);
        let window = resolve_time_window_at(&StatsQuery::default(), now);

        assert_eq!(window.end, now);
        assert_eq!(window.start, at(2023, 5, 31));
        assert_eq!(window.granularity, Granularity::Day);
    }

    #[test]
    fn too_fine_override_falls_back() {
        let q = StatsQuery::between(at(2023, 1, 1), at(2023, 12, 31))
            .with_granularity(Granularity::Hour);
        let window = resolve_time_window_at(&q, at(2024, 1, 1));
        assert_eq!(window.granularity, Granularity::Week);

        let q = StatsQuery::between(at(2023, 1, 1), at(2023, 12, 31))
            .with_granularity(Granularity::Month);
        let window = resolve_time_window_at(&q, at(2024, 1, 1));
        assert_eq!(window.granularity, Granularity::Month);
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert!(validate_granularity(at(2023, 2, 1), at(2023, 1, 1), Granularity::Month).is_err());
    }
}
