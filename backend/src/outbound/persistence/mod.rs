//! Persistence adapters: PostgreSQL via Diesel, plus in-memory fallbacks.

pub mod diesel_barcode_repository;
pub mod diesel_login_service;
pub mod error_mapping;
pub mod memory;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_barcode_repository::DieselBarcodeRepository;
pub use diesel_login_service::DieselLoginService;
pub use memory::{InMemoryBarcodeRepository, InMemoryLoginService};
pub use pool::{DbPool, PoolConfig, PoolError};
