//! Domain primitives and the barcode lifecycle core.
//!
//! Purpose: define strongly typed, transport-agnostic entities and the
//! ownership rules governing barcode records. Types are immutable and
//! validated at construction; adapters on either side of the hexagon map
//! to and from them.

pub mod auth;
pub mod barcode;
pub mod error;
pub mod lifecycle;
pub mod ports;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::barcode::{
    BarcodePayload, BarcodeRecord, BarcodeValidationError, NewBarcode, Symbology, PAYLOAD_MAX,
};
pub use self::error::{Error, ErrorCode};
pub use self::lifecycle::{BarcodeLifecycle, DEFAULT_STORE_TIMEOUT};
pub use self::user::{User, UserId, UserValidationError, Username, USERNAME_MAX};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
