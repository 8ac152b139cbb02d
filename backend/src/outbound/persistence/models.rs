//! Row structs bridging Diesel and the domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{barcodes, users};

/// Account row as stored in `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Barcode row as stored in `barcodes`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = barcodes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BarcodeRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub payload: String,
    pub symbology: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable barcode row; `id` and `created_at` come from column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = barcodes)]
pub struct NewBarcodeRow<'a> {
    pub owner_id: Uuid,
    pub payload: &'a str,
    pub symbology: &'a str,
}
