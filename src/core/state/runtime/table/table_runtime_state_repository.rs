use std::sync::Arc;
use tokio::sync::RwLock;

use super::table_runtime_state::TableRuntimeState;

/// Snapshot holder for one table's state.
pub struct TableRuntimeStateRepository<Row> {
    state: RwLock<Arc<TableRuntimeState<Row>>>,
}

impl<Row: Clone> TableRuntimeStateRepository<Row> {
    pub fn new(initial: TableRuntimeState<Row>) -> Self {
        Self {
            state: RwLock::new(Arc::new(initial)),
        }
    }

    /// Return the shared Arc snapshot (zero cost).
    pub async fn get(&self) -> Arc<TableRuntimeState<Row>> {
        self.state.read().await.clone()
    }

    /// Mutate the state by cloning and swapping, returning whatever `f` returns.
    /// Readers holding an older snapshot keep seeing it unchanged.
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TableRuntimeState<Row>) -> R,
    {
        let mut guard = self.state.write().await;

        let mut new_state = (**guard).clone();
        let out = f(&mut new_state);
        *guard = Arc::new(new_state);

        out
    }
}
