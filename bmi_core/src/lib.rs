#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI tracker.
//!
//! This crate provides:
//! - Domain types (measurements, units, categories, history entries)
//! - Static classification tables
//! - The BMI engine (conversion, categorization, risk, recommendations)
//! - Persistence (key-value stores, history log, CSV export)

pub mod types;
pub mod error;
pub mod tables;
pub mod config;
pub mod logging;
pub mod engine;
pub mod storage;
pub mod history;
pub mod csv_export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use tables::{bmi_categories, category_by_name};
pub use config::Config;
pub use engine::{assess, compute_bmi, metabolic_risk, recommendations, scale_position, Engine};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use history::{HistoryStore, DEFAULT_HISTORY_KEY};
pub use csv_export::export_history;
