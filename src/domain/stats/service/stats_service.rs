use anyhow::{Context, Result};
use tracing::debug;

use crate::api::dto::stats_dto::{SeriesPayload, StatsQuery};
use crate::core::client::BackendClient;
use crate::domain::common::model::TimeWindow;
use crate::domain::common::service::granularity::resolve_time_window;
use crate::domain::stats::aggregated_series::{AggregatedSeries, SeriesSummary};
use crate::routes::stats_path;

pub async fn fetch_series(
    client: &BackendClient,
    metric: String,
    q: StatsQuery,
) -> Result<AggregatedSeries> {
    let window = resolve_time_window(&q);
    fetch_series_in_window(client, &metric, &window).await
}

pub async fn summarize_series(
    client: &BackendClient,
    metric: String,
    q: StatsQuery,
) -> Result<SeriesSummary> {
    let series = fetch_series(client, metric, q).await?;
    Ok(series.summarize())
}

async fn fetch_series_in_window(
    client: &BackendClient,
    metric: &str,
    window: &TimeWindow,
) -> Result<AggregatedSeries> {
    let query = vec![
        ("start".to_string(), window.start.to_rfc3339()),
        ("end".to_string(), window.end.to_rfc3339()),
        ("granularity".to_string(), window.granularity.to_string()),
    ];

    let payload: SeriesPayload = client
        .get_json(&stats_path(metric), &query)
        .await
        .with_context(|| format!("Error fetching {} statistics", metric))?;

    let series = AggregatedSeries::new(payload.into_points());
    debug!(
        metric,
        granularity = %window.granularity,
        points = series.len(),
        "Fetched statistics series"
    );

    Ok(series)
}
