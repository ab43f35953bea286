//! Core types and utilities for the gold price feed
//!
//! This crate provides shared types used across all components:
//! - Quote, rate table, and aggregated price records
//! - Currency definitions
//! - Error taxonomy
//! - Clock abstraction and stream configuration

pub mod clock;
pub mod config;
pub mod errors;
pub mod types;

pub use clock::*;
pub use config::*;
pub use errors::*;
pub use types::*;
