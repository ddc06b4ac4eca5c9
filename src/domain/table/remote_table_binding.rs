use std::sync::Arc;

use tracing::{debug, error, warn};
use validator::Validate;

use crate::api::dto::table_query_dto::TableQueryState;
use crate::core::state::runtime::table::table_runtime_state::TableRuntimeState;
use crate::core::state::runtime::table::table_runtime_state_repository::TableRuntimeStateRepository;
use crate::domain::table::column::{render_table, ColumnDef, RenderedTable};
use crate::domain::table::fetcher::TableFetcher;
use crate::errors::{precondition, AppError};

/// What happened to the response of one state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows replaced the previous ones.
    Applied,
    /// The fetch failed; previous rows kept, status is `Error`.
    Failed,
    /// A newer transition started before this response arrived.
    Discarded,
}

/// Binds a table's `{page, sort}` state to a server-side fetch.
///
/// Every transition gets a new generation under the state lock and only the
/// response of the latest generation is applied. Fetches run outside the
/// lock, so transitions may overlap freely.
pub struct RemoteTableBinding<Row, F> {
    fetcher: F,
    columns: Vec<ColumnDef<Row>>,
    repo: TableRuntimeStateRepository<Row>,
}

impl<Row, F> RemoteTableBinding<Row, F>
where
    Row: Clone + Send + Sync + 'static,
    F: TableFetcher<Row>,
{
    pub fn new(fetcher: F, columns: Vec<ColumnDef<Row>>, initial: TableQueryState) -> Self {
        Self {
            fetcher,
            columns,
            repo: TableRuntimeStateRepository::new(TableRuntimeState::new(initial)),
        }
    }

    /// Initial fetch with the state the binding was created with.
    pub async fn mount(&self) -> Result<FetchOutcome, AppError> {
        self.transition(|current| Ok(current.clone())).await
    }

    /// Re-fetch the current state as a new transition.
    pub async fn refresh(&self) -> Result<FetchOutcome, AppError> {
        self.transition(|current| Ok(current.clone())).await
    }

    pub async fn toggle_sort(&self, column_id: &str) -> Result<FetchOutcome, AppError> {
        match self.columns.iter().find(|c| c.id == column_id) {
            Some(column) if column.sortable => {}
            Some(_) => {
                return Err(AppError::Precondition(format!(
                    "column '{}' is not sortable",
                    column_id
                )))
            }
            None => {
                return Err(AppError::Precondition(format!(
                    "unknown column '{}'",
                    column_id
                )))
            }
        }

        self.transition(|current| {
            let mut next = current.clone();
            next.toggle_sort(column_id);
            Ok(next)
        })
        .await
    }

    /// Navigate to `page`. Pages past `last_page` are passed through as-is.
    pub async fn go_to_page(&self, page: u32) -> Result<FetchOutcome, AppError> {
        self.transition(|current| {
            Ok(TableQueryState {
                page,
                sort: current.sort.clone(),
            })
        })
        .await
    }

    pub async fn snapshot(&self) -> Arc<TableRuntimeState<Row>> {
        self.repo.get().await
    }

    pub async fn render(&self) -> RenderedTable {
        let state = self.repo.get().await;
        render_table(&self.columns, &state.rows, state.query.sort.as_ref())
    }

    pub async fn query_string(&self) -> String {
        self.repo.get().await.query.to_query_string()
    }

    async fn transition<G>(&self, next: G) -> Result<FetchOutcome, AppError>
    where
        G: FnOnce(&TableQueryState) -> Result<TableQueryState, AppError>,
    {
        let (generation, query) = self
            .repo
            .update(|state| {
                let query = next(&state.query)?;
                query.validate().map_err(precondition)?;
                let generation = state.begin_transition(query.clone());
                Ok::<_, AppError>((generation, query))
            })
            .await?;

        debug!(generation, page = query.page, sort = ?query.sort, "Fetching table rows");

        let result = self.fetcher.fetch(query).await;

        let outcome = self
            .repo
            .update(|state| match result {
                Ok(page) => {
                    let (rows, meta) = page.into_parts();
                    if state.apply_rows(generation, rows, meta) {
                        FetchOutcome::Applied
                    } else {
                        FetchOutcome::Discarded
                    }
                }
                Err(err) => {
                    if state.apply_error(generation, format!("{:#}", err)) {
                        FetchOutcome::Failed
                    } else {
                        FetchOutcome::Discarded
                    }
                }
            })
            .await;

        match outcome {
            FetchOutcome::Applied => debug!(generation, "Applied table rows"),
            FetchOutcome::Failed => error!(generation, "Table fetch failed; keeping previous rows"),
            FetchOutcome::Discarded => warn!(generation, "Discarded superseded table response"),
        }

        Ok(outcome)
    }
}
