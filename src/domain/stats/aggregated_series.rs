use serde::Serialize;

use crate::api::dto::stats_dto::DataPoint;
use crate::core::util::number_util::NumberUtil;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IncrementTotals {
    pub total_increments: i64,
    pub total_decrements: i64,
}

/// Figures shown on a dashboard stat card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub points: usize,
    pub latest_value: Option<f64>,
    pub total_increments: i64,
    pub total_decrements: i64,
    /// `None` when there are fewer than two buckets to compare.
    pub percentage_increase: Option<i64>,
}

/// Backend-bucketed samples of one metric, ordered by `start`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregatedSeries {
    points: Vec<DataPoint>,
}

impl AggregatedSeries {
    pub fn new(mut points: Vec<DataPoint>) -> Self {
        points.sort_by_key(|p| p.start);
        Self { points }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Result<&DataPoint, AppError> {
        self.points
            .first()
            .ok_or_else(|| AppError::OutOfRange("first() on an empty series".into()))
    }

    pub fn last(&self) -> Result<&DataPoint, AppError> {
        self.points
            .last()
            .ok_or_else(|| AppError::OutOfRange("last() on an empty series".into()))
    }

    pub fn total_increments_and_decrements(&self) -> IncrementTotals {
        self.points
            .iter()
            .fold(IncrementTotals::default(), |acc, p| IncrementTotals {
                total_increments: acc.total_increments + p.increments,
                total_decrements: acc.total_decrements + p.decrements,
            })
    }

    /// Change of the last bucket's value over the one before it, in whole
    /// percent. A zero baseline yields `0`, not infinity.
    pub fn percentage_increase(&self) -> Result<i64, AppError> {
        match self.points.as_slice() {
            [.., previous, last] => Ok(NumberUtil::percentage_change(previous.value, last.value)),
            _ => Err(AppError::Precondition(format!(
                "percentage_increase() needs at least two data points, got {}",
                self.points.len()
            ))),
        }
    }

    pub fn summarize(&self) -> SeriesSummary {
        let totals = self.total_increments_and_decrements();

        SeriesSummary {
            points: self.points.len(),
            latest_value: self.points.last().map(|p| p.value),
            total_increments: totals.total_increments,
            total_decrements: totals.total_decrements,
            percentage_increase: self.percentage_increase().ok(),
        }
    }
}

impl From<Vec<DataPoint>> for AggregatedSeries {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a AggregatedSeries {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn point(day: i64, value: f64, increments: i64, decrements: i64) -> DataPoint {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap() + Duration::days(day);
        DataPoint {
            start,
            end: start + Duration::days(1),
            value,
            increments,
            decrements,
            difference: increments - decrements,
        }
    }

    #[test]
    fn empty_series_access_is_out_of_range() {
        let series = AggregatedSeries::default();
        assert!(matches!(series.first(), Err(AppError::OutOfRange(_))));
        assert!(matches!(series.last(), Err(AppError::OutOfRange(_))));
        assert_eq!(series.total_increments_and_decrements(), IncrementTotals::default());
    }

    #[test]
    fn totals_fold_independently() {
        let series = AggregatedSeries::new(vec![point(0, 1.0, 2, 1), point(1, 2.0, 3, 0)]);
        assert_eq!(
            series.total_increments_and_decrements(),
            IncrementTotals {
                total_increments: 5,
                total_decrements: 1
            }
        );
    }

    #[test]
    fn percentage_increase_needs_two_points() {
        let one = AggregatedSeries::new(vec![point(0, 10.0, 0, 0)]);
        assert!(matches!(one.percentage_increase(), Err(AppError::Precondition(_))));
        assert!(matches!(
            AggregatedSeries::default().percentage_increase(),
            Err(AppError::Precondition(_))
        ));
    }

    #[test]
    fn percentage_increase_compares_last_two_buckets() {
        let series = AggregatedSeries::new(vec![
            point(0, 50.0, 0, 0),
            point(1, 200.0, 0, 0),
            point(2, 150.0, 0, 0),
        ]);
        assert_eq!(series.percentage_increase().unwrap(), -25);

        let zero_base = AggregatedSeries::new(vec![point(0, 0.0, 0, 0), point(1, 40.0, 0, 0)]);
        assert_eq!(zero_base.percentage_increase().unwrap(), 0);

        let third = AggregatedSeries::new(vec![point(0, 3.0, 0, 0), point(1, 4.0, 0, 0)]);
        assert_eq!(third.percentage_increase().unwrap(), 33);
    }

    #[test]
    fn construction_orders_by_start() {
        let series = AggregatedSeries::new(vec![point(2, 3.0, 0, 0), point(0, 1.0, 0, 0)]);
        assert_eq!(series.first().unwrap().value, 1.0);
        assert_eq!(series.last().unwrap().value, 3.0);
    }

    #[test]
    fn monthly_revenue_doubling_is_one_hundred_percent() {
        let points: Vec<DataPoint> = serde_json::from_value(json!([
            { "start": "2023-01-01", "end": "2023-01-31", "value": 1000 },
            { "start": "2023-02-01", "end": "2023-02-28", "value": 2000 }
        ]))
        .unwrap();

        let series = AggregatedSeries::from(points);
        assert_eq!(series.percentage_increase().unwrap(), 100);
    }

    #[test]
    fn summary_tolerates_short_series() {
        let summary = AggregatedSeries::new(vec![point(0, 12.0, 4, 1)]).summarize();
        assert_eq!(summary.points, 1);
        assert_eq!(summary.latest_value, Some(12.0));
        assert_eq!(summary.total_increments, 4);
        assert_eq!(summary.total_decrements, 1);
        assert_eq!(summary.percentage_increase, None);
    }
}
