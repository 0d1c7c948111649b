//! Terminal UI layer for GrindGraph.
//!
//! Provides themes, the header and banner components, the overview table,
//! the three dashboard charts and the main application event loop built on
//! top of [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod dashboard_view;
pub mod table_view;
pub mod themes;

pub use grind_core as core;
