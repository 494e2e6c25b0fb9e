//! Core library functions for the relation network analyzer

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod graph;
pub mod storage;
pub mod viz;

pub use anyhow::{anyhow, Result};
pub use error::AnalysisError;
