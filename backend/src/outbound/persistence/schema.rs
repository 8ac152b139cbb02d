//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` when migrations change.

diesel::table! {
    /// Registered accounts.
    ///
    /// The `id` column is the primary key (UUID v4, database-assigned).
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// Argon2 PHC-format password hash.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Saved barcodes, each owned by exactly one account.
    ///
    /// Rows are immutable after insert; the only mutations are insert and
    /// delete.
    barcodes (id) {
        /// Primary key: UUID v4 identifier, database-assigned.
        id -> Uuid,
        /// Owning account; foreign key to `users.id`, never null.
        owner_id -> Uuid,
        /// Encoded text content (non-empty, max 256 characters).
        payload -> Varchar,
        /// Barcode format name, e.g. `CODE128`.
        symbology -> Varchar,
        /// Database-assigned creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(barcodes -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(users, barcodes);
