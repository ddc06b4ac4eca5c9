//! Table view state DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column_id: String,
    pub descending: bool,
}

impl SortState {
    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: false,
        }
    }

    pub fn descending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: true,
        }
    }
}

/// `{page, sort}` view state of a remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TableQueryState {
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortState>,
}

impl Default for TableQueryState {
    fn default() -> Self {
        Self { page: 1, sort: None }
    }
}

impl TableQueryState {
    pub fn new(page: u32) -> Self {
        Self { page, sort: None }
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Three-way cycle on `column_id`: unsorted → ascending → descending →
    /// unsorted. A click on another column replaces the current sort.
    pub fn toggle_sort(&mut self, column_id: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.column_id == column_id => {
                if current.descending {
                    None
                } else {
                    Some(SortState::descending(column_id))
                }
            }
            _ => Some(SortState::ascending(column_id)),
        };
    }

    /// Browser-style query string, e.g. `page=2&sort=name&desc=true`.
    /// Spaces are form-encoded as `+`.
    pub fn to_query_string(&self) -> String {
        let query = TableUrlQuery {
            page: Some(self.page.to_string()),
            sort: self.sort.as_ref().map(|s| s.column_id.clone()),
            desc: self.sort.as_ref().map(|s| s.descending.to_string()),
        };
        serde_urlencoded::to_string(&query).unwrap_or_else(|_| format!("page={}", self.page))
    }

    /// Inverse of [`Self::to_query_string`]. Unknown keys are ignored and an
    /// invalid or missing page falls back to 1.
    pub fn from_query_string(raw: &str) -> Self {
        let query: TableUrlQuery =
            serde_urlencoded::from_str(raw.trim_start_matches('?')).unwrap_or_default();

        let page = query
            .page
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let descending = matches!(query.desc.as_deref(), Some("true" | "1"));

        Self {
            page,
            sort: query
                .sort
                .filter(|column_id| !column_id.is_empty())
                .map(|column_id| SortState {
                    column_id,
                    descending,
                }),
        }
    }
}

/// Raw URL form of [`TableQueryState`]; every field stays a string so that
/// malformed values fall back instead of failing the whole decode.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct TableUrlQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    desc: Option<String>,
}
