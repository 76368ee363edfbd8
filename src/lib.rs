pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
