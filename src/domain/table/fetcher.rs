use std::collections::BTreeMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::dto::list_query_dto::ListQuery;
use crate::api::dto::paginated_response::FetchPage;
use crate::api::dto::table_query_dto::TableQueryState;
use crate::core::client::BackendClient;

/// Fetch boundary of a remote table: rows for one query state.
#[async_trait]
pub trait TableFetcher<Row>: Send + Sync {
    async fn fetch(&self, state: TableQueryState) -> Result<FetchPage<Row>>;
}

#[async_trait]
impl<Row, F, Fut> TableFetcher<Row> for F
where
    Row: Send + 'static,
    F: Fn(TableQueryState) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchPage<Row>>> + Send + 'static,
{
    async fn fetch(&self, state: TableQueryState) -> Result<FetchPage<Row>> {
        (self)(state).await
    }
}

/// Lists a backend collection, e.g. `/events`, page by page.
pub struct BackendTableFetcher<Row> {
    client: Arc<BackendClient>,
    path: String,
    per_page: Option<u32>,
    filters: BTreeMap<String, Value>,
    _row: PhantomData<fn() -> Row>,
}

impl<Row> BackendTableFetcher<Row> {
    pub fn new(client: Arc<BackendClient>, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            per_page: None,
            filters: BTreeMap::new(),
            _row: PhantomData,
        }
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn list_query(&self, state: &TableQueryState) -> ListQuery {
        ListQuery::from_state(state)
            .per_page(self.per_page)
            .filters(self.filters.clone())
    }
}

#[async_trait]
impl<Row> TableFetcher<Row> for BackendTableFetcher<Row>
where
    Row: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, state: TableQueryState) -> Result<FetchPage<Row>> {
        let query = self.list_query(&state).to_query_pairs();
        let page = self
            .client
            .get_json::<FetchPage<Row>>(&self.path, &query)
            .await
            .with_context(|| format!("Error fetching {}", self.path.trim_start_matches('/')))?;
        Ok(page)
    }
}
