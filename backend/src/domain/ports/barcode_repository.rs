//! Driven port for barcode record persistence.
//!
//! In hexagonal terms this is a *driven* port: the lifecycle service talks
//! to the store through it without knowing whether rows live in PostgreSQL
//! or in memory. Adapters map their infrastructure failures into
//! [`BarcodeRepositoryError`]; the lifecycle service decides how those
//! surface to callers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BarcodeRecord, NewBarcode, UserId};

/// Errors raised by barcode repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarcodeRepositoryError {
    /// Store connection could not be established.
    #[error("barcode store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("barcode store query failed: {message}")]
    Query { message: String },
}

impl BarcodeRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for reading and mutating persisted barcode records.
///
/// Ordering contract: `list_for_owner` returns records newest first
/// (`created_at` descending); ties keep a stable order across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BarcodeRepository: Send + Sync {
    /// Insert a record; the store assigns `id` and `created_at`.
    async fn insert(&self, new: NewBarcode) -> Result<BarcodeRecord, BarcodeRepositoryError>;

    /// All records owned by `owner`, newest first.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<BarcodeRecord>, BarcodeRepositoryError>;

    /// Look up a record by id regardless of owner.
    async fn find_by_id(&self, id: &Uuid)
        -> Result<Option<BarcodeRecord>, BarcodeRepositoryError>;

    /// Delete a record by id; `false` when no row existed.
    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, BarcodeRepositoryError>;
}
