//! Concrete adapter implementations for ports.

pub mod csv_store_adapter;
pub mod file_config_adapter;
pub mod http_feed_adapter;
#[cfg(feature = "web")]
pub mod web;
