pub mod common;
pub mod stats;
pub mod table;
