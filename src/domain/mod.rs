//! Core domain types and logic.

pub mod holding;
pub mod series;
pub mod metric;
pub mod snapshot;
pub mod rotation;
pub mod layout;
pub mod error;
