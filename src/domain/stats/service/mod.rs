pub mod stats_service;
