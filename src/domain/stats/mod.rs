//! Time-series statistics: bucketed samples and their summary figures

pub mod aggregated_series;
pub mod service;

pub use aggregated_series::{AggregatedSeries, IncrementTotals, SeriesSummary};
