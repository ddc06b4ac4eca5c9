use serde::Deserialize;
use tracing::{info, warn};

use crate::api::dto::stats_dto::StatsQuery;
use crate::api::dto::table_query_dto::TableQueryState;
use crate::app_state::AppState;
use crate::domain::table::{CellValue, ColumnDef, FetchOutcome};

#[derive(Debug, Clone, Deserialize)]
struct OrderRow {
    id: u64,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    total: Option<f64>,
}

/// Runs only when in BOXOFFICE_DEBUG_MODE
pub async fn run_debug(state: &AppState) {
    info!("🔧 Debug mode: running debug tasks...");

    for metric in state.config.dashboard_metrics.iter() {
        match state
            .stats_service
            .fetch_series(metric.clone(), StatsQuery::default())
            .await
        {
            Ok(series) => info!(metric = %metric, points = series.len(), summary = ?series.summarize(), "Fetched series"),
            Err(err) => warn!(metric = %metric, error = %format!("{:#}", err), "Series fetch failed"),
        }
    }

    let orders = state.remote_table(
        "orders",
        vec![
            ColumnDef::new("id", "#", |o: &OrderRow| CellValue::Integer(o.id as i64)),
            ColumnDef::new("status", "Status", |o: &OrderRow| CellValue::from(o.status.clone())),
            ColumnDef::new("total", "Total", |o: &OrderRow| CellValue::from(o.total)),
        ],
        TableQueryState::default(),
    );

    match orders.mount().await {
        Ok(FetchOutcome::Applied) => {
            let table = orders.render().await;
            info!(rows = table.rows.len(), query = %orders.query_string().await, "Orders table mounted");

            let meta = orders.snapshot().await.meta.clone();
            if let Some(meta) = meta.filter(|m| m.has_next()) {
                match orders.go_to_page(meta.current_page + 1).await {
                    Ok(outcome) => {
                        let has_previous = orders
                            .snapshot()
                            .await
                            .meta
                            .as_ref()
                            .is_some_and(|m| m.has_previous());
                        info!(?outcome, has_previous, query = %orders.query_string().await, "Orders table paged forward");
                    }
                    Err(err) => warn!(error = %err, "Orders table rejected the next page"),
                }
            }
        }
        Ok(outcome) => {
            let snapshot = orders.snapshot().await;
            warn!(?outcome, error = ?snapshot.error(), "Orders table not ready");
        }
        Err(err) => warn!(error = %err, "Orders table rejected its initial state"),
    }

    info!("Debug tasks completed. Exiting...");
}
