//! PostgreSQL-backed `BarcodeRepository` implementation using Diesel ORM.
//!
//! Rows are hydrated through the validating domain constructors so an
//! invariant-violating row (blank payload, unknown symbology) is rejected
//! as a query error instead of leaking into the domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{BarcodeRepository, BarcodeRepositoryError};
use crate::domain::{BarcodePayload, BarcodeRecord, NewBarcode, Symbology, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BarcodeRow, NewBarcodeRow};
use super::pool::{DbPool, PoolError};
use super::schema::barcodes;

/// Diesel-backed implementation of the barcode repository port.
#[derive(Clone)]
pub struct DieselBarcodeRepository {
    pool: DbPool,
}

impl DieselBarcodeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> BarcodeRepositoryError {
    map_pool_error(error, BarcodeRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> BarcodeRepositoryError {
    map_diesel_error(
        error,
        BarcodeRepositoryError::query,
        BarcodeRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain record.
fn row_to_record(row: BarcodeRow) -> Result<BarcodeRecord, BarcodeRepositoryError> {
    let BarcodeRow {
        id,
        owner_id,
        payload,
        symbology,
        created_at,
    } = row;

    let payload = BarcodePayload::new(payload)
        .map_err(|err| BarcodeRepositoryError::query(format!("invalid stored payload: {err}")))?;
    let symbology: Symbology = symbology
        .parse()
        .map_err(|err| BarcodeRepositoryError::query(format!("invalid stored symbology: {err}")))?;

    Ok(BarcodeRecord::from_parts(
        id,
        UserId::from_uuid(owner_id),
        payload,
        symbology,
        created_at,
    ))
}

#[async_trait]
impl BarcodeRepository for DieselBarcodeRepository {
    async fn insert(&self, new: NewBarcode) -> Result<BarcodeRecord, BarcodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewBarcodeRow {
            owner_id: *new.owner_id.as_uuid(),
            payload: new.payload.as_str(),
            symbology: new.symbology.as_str(),
        };

        let inserted: BarcodeRow = diesel::insert_into(barcodes::table)
            .values(&row)
            .returning(BarcodeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_record(inserted)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<BarcodeRecord>, BarcodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<BarcodeRow> = barcodes::table
            .filter(barcodes::owner_id.eq(owner.as_uuid()))
            .order(barcodes::created_at.desc())
            .select(BarcodeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<BarcodeRecord>, BarcodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<BarcodeRow> = barcodes::table
            .find(id)
            .select(BarcodeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, BarcodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(barcodes::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row hydration coverage; live-database behaviour is exercised by the
    //! lifecycle suites over the in-memory adapter.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn row(payload: &str, symbology: &str) -> BarcodeRow {
        BarcodeRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            payload: payload.to_owned(),
            symbology: symbology.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn valid_rows_hydrate() {
        let record = row_to_record(row("12345", "CODE128")).expect("valid row");
        assert_eq!(record.payload().as_str(), "12345");
        assert_eq!(record.symbology(), Symbology::Code128);
    }

    #[rstest]
    #[case("", "CODE128")]
    #[case("12345", "QRCODE")]
    fn invariant_violating_rows_are_rejected(#[case] payload: &str, #[case] symbology: &str) {
        let err = row_to_record(row(payload, symbology)).expect_err("row must be rejected");
        assert!(matches!(err, BarcodeRepositoryError::Query { .. }));
    }
}
