use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::table_query_dto::SortState;

/// A cell as extracted from a row, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Empty,
}

impl CellValue {
    pub fn format_default(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Number(n) => format!("{:.2}", n),
            CellValue::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
            CellValue::Empty => "-".to_string(),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(ts: DateTime<Utc>) -> Self {
        CellValue::Timestamp(ts)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// Plain-data column definition: where a cell comes from and how it prints.
pub struct ColumnDef<Row> {
    pub id: String,
    pub label: String,
    pub accessor: fn(&Row) -> CellValue,
    pub formatter: Option<fn(&CellValue) -> String>,
    pub sortable: bool,
}

// Manual impl: derive would require `Row: Clone`.
impl<Row> Clone for ColumnDef<Row> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            accessor: self.accessor,
            formatter: self.formatter,
            sortable: self.sortable,
        }
    }
}

impl<Row> ColumnDef<Row> {
    pub fn new(id: impl Into<String>, label: impl Into<String>, accessor: fn(&Row) -> CellValue) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            accessor,
            formatter: None,
            sortable: true,
        }
    }

    pub fn formatter(mut self, formatter: fn(&CellValue) -> String) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn render_cell(&self, row: &Row) -> String {
        let value = (self.accessor)(row);
        match self.formatter {
            Some(f) => f(&value),
            None => value.format_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderedTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<String>>,
}

pub fn render_table<Row>(
    columns: &[ColumnDef<Row>],
    rows: &[Row],
    sort: Option<&SortState>,
) -> RenderedTable {
    let headers = columns
        .iter()
        .map(|c| HeaderCell {
            id: c.id.clone(),
            label: c.label.clone(),
            sortable: c.sortable,
            sort: sort.filter(|s| s.column_id == c.id).map(|s| {
                if s.descending {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                }
            }),
        })
        .collect();

    let rows = rows
        .iter()
        .map(|row| columns.iter().map(|c| c.render_cell(row)).collect())
        .collect();

    RenderedTable { headers, rows }
}
