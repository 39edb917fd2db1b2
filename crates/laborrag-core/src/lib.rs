//! laborrag-core
//!
//! Shared domain types, typed errors, the model/extraction traits, figment
//! configuration and the ingestion path (extract -> segment -> corpus).

pub mod config;
pub mod data_processor;
pub mod error;
pub mod extract;
pub mod segment;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
