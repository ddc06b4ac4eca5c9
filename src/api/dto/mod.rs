//! DTOs exchanged with the backend and with table views

pub mod list_query_dto;
pub mod paginated_response;
pub mod stats_dto;
pub mod table_query_dto;
