use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
}

impl PaginationMeta {
    /// Clamp a requested page into `1..=last_page`.
    ///
    /// The table binding never clamps on its own; view code calls this
    /// before navigating.
    pub fn clamp_page(&self, requested: u32) -> u32 {
        requested.clamp(1, self.last_page.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// What a table fetch may return: a paginated envelope or a bare row list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchPage<T> {
    Paginated(PaginatedResponse<T>),
    Rows(Vec<T>),
}

impl<T> FetchPage<T> {
    pub fn into_parts(self) -> (Vec<T>, Option<PaginationMeta>) {
        match self {
            FetchPage::Paginated(page) => (page.data, Some(page.meta)),
            FetchPage::Rows(rows) => (rows, None),
        }
    }
}

impl<T> From<Vec<T>> for FetchPage<T> {
    fn from(rows: Vec<T>) -> Self {
        FetchPage::Rows(rows)
    }
}

impl<T> From<PaginatedResponse<T>> for FetchPage<T> {
    fn from(page: PaginatedResponse<T>) -> Self {
        FetchPage::Paginated(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(current_page: u32, last_page: u32) -> PaginationMeta {
        PaginationMeta {
            current_page,
            last_page,
            total: 42,
            per_page: Some(15),
            from: None,
            to: None,
        }
    }

    #[test]
    fn clamp_page_stays_within_bounds() {
        let m = meta(1, 3);
        assert_eq!(m.clamp_page(0), 1);
        assert_eq!(m.clamp_page(2), 2);
        assert_eq!(m.clamp_page(9), 3);

        // An empty listing still reports page 1.
        assert_eq!(meta(1, 0).clamp_page(4), 1);
    }

    #[test]
    fn navigation_flags() {
        assert!(meta(1, 3).has_next());
        assert!(!meta(1, 3).has_previous());
        assert!(!meta(3, 3).has_next());
    }

    #[test]
    fn fetch_page_decodes_envelope_and_bare_rows() {
        let envelope: FetchPage<String> = serde_json::from_value(json!({
            "data": ["a", "b"],
            "meta": { "current_page": 2, "last_page": 5, "total": 10, "path": "/events" }
        }))
        .unwrap();
        let (rows, m) = envelope.into_parts();
        assert_eq!(rows, vec!["a", "b"]);
        assert_eq!(m.unwrap().current_page, 2);

        let bare: FetchPage<String> = serde_json::from_value(json!(["c"])).unwrap();
        let (rows, m) = bare.into_parts();
        assert_eq!(rows, vec!["c"]);
        assert!(m.is_none());
    }
}
