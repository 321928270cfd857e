pub mod config;
pub mod date_key;
pub mod error;
pub mod model;
pub mod storage;
pub mod task_api;
