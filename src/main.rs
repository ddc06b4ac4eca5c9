use anyhow::Result;
use serde_json::json;
use tracing::{error, info};

use boxoffice_console::api::dto::stats_dto::StatsQuery;
use boxoffice_console::app_state::build_app_state;
use boxoffice_console::core::config::{init_tracing, AppConfig};
use boxoffice_console::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(&config);
    let state = build_app_state(config)?;

    info!(api = %state.client.base_url(), "Box office console starting");

    if state.config.debug_mode {
        debug::run_debug(&state).await;
        return Ok(());
    }

    for metric in state.config.dashboard_metrics.iter() {
        match state
            .stats_service
            .summarize(metric.clone(), StatsQuery::default())
            .await
        {
            Ok(summary) => {
                println!("{}", json!({ "metric": metric, "summary": summary }));
            }
            Err(err) => error!(metric = %metric, error = %format!("{:#}", err), "Err"),
        }
    }

    Ok(())
}
