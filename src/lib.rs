//! Farm advisory engine for Kenyan agriculture.
//!
//! Environmental data comes from chains of external providers that
//! degrade to deterministic synthetic generators, so every query
//! answers even fully offline; the `source` field on each report says
//! which tier produced it.

pub mod advisory;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod models;
pub mod providers;
pub mod services;
pub mod store;

pub use config::Config;
pub use engine::FarmAdvisor;
pub use error::{Result, ShambaError};
