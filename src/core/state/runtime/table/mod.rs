pub mod table_runtime_state;
pub mod table_runtime_state_repository;
