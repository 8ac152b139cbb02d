//! HTTP adapter for the domain services.
//!
//! Handlers translate between the wire format and domain types; everything
//! behind them is expressed in terms of domain ports.

pub mod auth;
pub mod barcodes;
pub mod error;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;

pub use error::{ApiError, ApiResult};
