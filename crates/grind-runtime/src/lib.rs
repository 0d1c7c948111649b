//! Runtime layer for GrindGraph.
//!
//! Sits between the ingestion pipeline and the UI: a memoizing
//! [`data_manager::DataManager`] and the filter and chart-series logic in
//! [`dashboard`].

pub mod dashboard;
pub mod data_manager;

pub use grind_core as core;
pub use grind_data as data;
