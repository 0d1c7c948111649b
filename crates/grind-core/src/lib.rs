//! Shared domain layer for GrindGraph.
//!
//! Typed records for the Fitbit activity and sleep exports, the error
//! taxonomy, calendar helpers, number formatting and CLI settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{GrindError, Result};
