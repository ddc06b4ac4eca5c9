//! Backend endpoint paths used by the console

/// Statistics series of a dashboard metric (orders, revenue, customers, ...).
pub fn stats_path(metric: &str) -> String {
    format!("/stats/{}", urlencoding::encode(metric.trim()))
}

/// A backend collection listed by remote tables, e.g. `collection_path("events")`.
pub fn collection_path(resource: &str) -> String {
    format!("/{}", resource.trim_matches('/'))
}
