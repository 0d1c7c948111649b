//! Ingestion-and-merge pipeline for GrindGraph.
//!
//! Reads the two periods' activity and sleep CSV exports, normalizes dates,
//! rolls minute-level sleep up to daily totals and left-joins them onto the
//! activity rows, producing one [`DailyTable`](grind_core::models::DailyTable).

pub mod aggregator;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod reader;

pub use grind_core as core;
