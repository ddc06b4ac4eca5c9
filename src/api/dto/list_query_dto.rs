//! Backend list query parameters

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::table_query_dto::{SortState, TableQueryState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: Option<u32>,
    pub sort: Option<SortState>,
    /// Serialized as one JSON object in the `filters` parameter.
    pub filters: BTreeMap<String, Value>,
}

#[derive(Serialize)]
struct SortParam<'a> {
    id: &'a str,
    desc: bool,
}

impl ListQuery {
    pub fn from_state(state: &TableQueryState) -> Self {
        Self {
            page: state.page,
            per_page: None,
            sort: state.sort.clone(),
            filters: BTreeMap::new(),
        }
    }

    pub fn per_page(mut self, per_page: Option<u32>) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn filters(mut self, filters: BTreeMap<String, Value>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.max(1).to_string())];

        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".into(), per_page.to_string()));
        }

        if let Some(sort) = &self.sort {
            let param = [SortParam {
                id: &sort.column_id,
                desc: sort.descending,
            }];
            // Serializing a slice of plain structs cannot fail.
            if let Ok(raw) = serde_json::to_string(&param) {
                pairs.push(("sort".into(), raw));
            }
        }

        if !self.filters.is_empty() {
            if let Ok(raw) = serde_json::to_string(&self.filters) {
                pairs.push(("filters".into(), raw));
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_page_only() {
        let q = ListQuery::from_state(&TableQueryState::new(2));
        assert_eq!(q.to_query_pairs(), vec![("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn sort_and_filters_are_json_strings() {
        let state = TableQueryState::new(1).with_sort(SortState::descending("starts_at"));
        let q = ListQuery::from_state(&state)
            .per_page(Some(25))
            .filter("status", "published")
            .filter("venue_id", 7);

        let pairs = q.to_query_pairs();
        assert_eq!(pairs[1], ("per_page".to_string(), "25".to_string()));
        assert_eq!(
            pairs[2],
            ("sort".to_string(), r#"[{"id":"starts_at","desc":true}]"#.to_string())
        );

        let filters: Value = serde_json::from_str(&pairs[3].1).unwrap();
        assert_eq!(filters, json!({ "status": "published", "venue_id": 7 }));
    }
}
