use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::paginated_response::PaginationMeta;
use crate::api::dto::table_query_dto::TableQueryState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum TableStatus {
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// View state of one remote table.
#[derive(Debug, Clone, Serialize)]
pub struct TableRuntimeState<Row> {
    pub query: TableQueryState,
    pub status: TableStatus,
    pub rows: Vec<Row>,
    pub meta: Option<PaginationMeta>,
    /// Bumped on every state transition; a response is applied only if it
    /// was issued for the current generation.
    pub generation: u64,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl<Row> TableRuntimeState<Row> {
    pub fn new(query: TableQueryState) -> Self {
        Self {
            query,
            status: TableStatus::Idle,
            rows: Vec::new(),
            meta: None,
            generation: 0,
            last_fetched_at: None,
        }
    }

    /// Enter `Loading` for `query` and return the generation the fetch must carry.
    pub fn begin_transition(&mut self, query: TableQueryState) -> u64 {
        self.generation += 1;
        self.query = query;
        self.status = TableStatus::Loading;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Returns false (and leaves the state untouched) for a superseded generation.
    pub fn apply_rows(
        &mut self,
        generation: u64,
        rows: Vec<Row>,
        meta: Option<PaginationMeta>,
    ) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.rows = rows;
        self.meta = meta;
        self.status = TableStatus::Ready;
        self.last_fetched_at = Some(Utc::now());
        true
    }

    /// Rows and meta survive a failed fetch.
    pub fn apply_error(&mut self, generation: u64, message: String) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.status = TableStatus::Error(message);
        true
    }

    pub fn is_loading(&self) -> bool {
        self.status == TableStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            TableStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_generations_are_ignored() {
        let mut state: TableRuntimeState<u32> = TableRuntimeState::new(TableQueryState::default());

        let first = state.begin_transition(TableQueryState::new(1));
        let second = state.begin_transition(TableQueryState::new(2));

        assert!(!state.apply_rows(first, vec![1], None));
        assert!(state.rows.is_empty());
        assert!(state.is_loading());

        assert!(state.apply_rows(second, vec![2], None));
        assert_eq!(state.rows, vec![2]);
        assert_eq!(state.status, TableStatus::Ready);
        assert!(state.last_fetched_at.is_some());
    }

    #[test]
    fn error_keeps_previous_rows() {
        let mut state: TableRuntimeState<u32> = TableRuntimeState::new(TableQueryState::default());
        let g = state.begin_transition(TableQueryState::new(1));
        state.apply_rows(g, vec![7, 8], None);

        let g = state.begin_transition(TableQueryState::new(2));
        assert!(state.apply_error(g, "Error fetching orders".into()));

        assert_eq!(state.rows, vec![7, 8]);
        assert_eq!(state.error(), Some("Error fetching orders"));
        assert_eq!(state.query.page, 2);
    }

    #[test]
    fn stale_errors_are_ignored() {
        let mut state: TableRuntimeState<u32> = TableRuntimeState::new(TableQueryState::default());
        let first = state.begin_transition(TableQueryState::new(1));
        let second = state.begin_transition(TableQueryState::new(2));
        assert!(state.apply_rows(second, vec![2], None));

        assert!(!state.apply_error(first, "Error fetching orders".into()));
        assert_eq!(state.status, TableStatus::Ready);
        assert!(state.error().is_none());
        assert_eq!(state.rows, vec![2]);
    }
}
