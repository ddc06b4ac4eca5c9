//! Remote paginated/sortable tables

pub mod column;
pub mod fetcher;
pub mod remote_table_binding;

pub use column::{render_table, CellValue, ColumnDef, RenderedTable};
pub use fetcher::{BackendTableFetcher, TableFetcher};
pub use remote_table_binding::{FetchOutcome, RemoteTableBinding};
