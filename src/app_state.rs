use std::sync::Arc;

use crate::api::dto::stats_dto::StatsQuery;
use crate::api::dto::table_query_dto::TableQueryState;
use crate::core::client::BackendClient;
use crate::core::config::AppConfig;
use crate::domain::stats::{AggregatedSeries, SeriesSummary};
use crate::domain::table::{BackendTableFetcher, ColumnDef, RemoteTableBinding};
use crate::errors::AppError;
use crate::routes::collection_path;

macro_rules! delegate_client_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> anyhow::Result<$ret> {
                $path(&self.client, $($arg),*).await
            }
        )+
    };
}

/// Application context built once at bootstrap and passed down explicitly.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: Arc<BackendClient>,
    pub stats_service: Arc<StatsService>,
}

pub fn build_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let client = Arc::new(BackendClient::new(&config)?);

    Ok(AppState {
        config: Arc::new(config),
        stats_service: Arc::new(StatsService::new(client.clone())),
        client,
    })
}

impl AppState {
    /// A remote table over a backend collection, paged by the configured page size.
    pub fn remote_table<Row>(
        &self,
        resource: &str,
        columns: Vec<ColumnDef<Row>>,
        initial: TableQueryState,
    ) -> RemoteTableBinding<Row, BackendTableFetcher<Row>>
    where
        Row: serde::de::DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let fetcher = BackendTableFetcher::new(self.client.clone(), collection_path(resource))
            .per_page(self.config.page_size);
        RemoteTableBinding::new(fetcher, columns, initial)
    }
}

#[derive(Clone)]
pub struct StatsService {
    client: Arc<BackendClient>,
}

impl StatsService {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    delegate_client_service! {
        fn fetch_series(metric: String, q: StatsQuery) -> AggregatedSeries => crate::domain::stats::service::stats_service::fetch_series;
        fn summarize(metric: String, q: StatsQuery) -> SeriesSummary => crate::domain::stats::service::stats_service::summarize_series;
    }
}
