//! Barcode record aggregate and its validated value types.
//!
//! Records are immutable once persisted: the only mutations the domain
//! allows are create and delete. Construction always passes through the
//! validating constructors here, so a persisted record can never carry an
//! empty payload or a missing owner.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Maximum accepted payload length in characters.
pub const PAYLOAD_MAX: usize = 256;

/// Validation errors raised by barcode constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarcodeValidationError {
    /// Payload was empty or whitespace-only after trimming.
    EmptyPayload,
    /// Payload exceeds [`PAYLOAD_MAX`] characters.
    PayloadTooLong { max: usize },
    /// Payload contains characters outside printable ASCII.
    PayloadNotAscii,
    /// Symbology string is not part of the enumerated set.
    UnknownSymbology { value: String },
}

impl fmt::Display for BarcodeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "payload must not be empty"),
            Self::PayloadTooLong { max } => {
                write!(f, "payload must be at most {max} characters")
            }
            Self::PayloadNotAscii => {
                write!(f, "payload may only contain printable ASCII characters")
            }
            Self::UnknownSymbology { value } => {
                write!(f, "unknown symbology: {value}")
            }
        }
    }
}

impl std::error::Error for BarcodeValidationError {}

/// Closed set of supported barcode formats.
///
/// The wire representation matches the format names the rendering delegate
/// understands, e.g. `CODE128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbology {
    Code128,
    Code39,
    Codabar,
    Ean13,
    Ean8,
    Itf,
}

impl Symbology {
    /// All supported symbologies, in display order.
    pub const ALL: [Self; 6] = [
        Self::Code128,
        Self::Code39,
        Self::Codabar,
        Self::Ean13,
        Self::Ean8,
        Self::Itf,
    ];

    /// Canonical wire name for the symbology.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code128 => "CODE128",
            Self::Code39 => "CODE39",
            Self::Codabar => "CODABAR",
            Self::Ean13 => "EAN13",
            Self::Ean8 => "EAN8",
            Self::Itf => "ITF",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbology {
    type Err = BarcodeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CODE128" => Ok(Self::Code128),
            "CODE39" => Ok(Self::Code39),
            "CODABAR" => Ok(Self::Codabar),
            "EAN13" => Ok(Self::Ean13),
            "EAN8" => Ok(Self::Ean8),
            "ITF" => Ok(Self::Itf),
            other => Err(BarcodeValidationError::UnknownSymbology {
                value: other.to_owned(),
            }),
        }
    }
}

/// Text content encoded into the barcode.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - At most [`PAYLOAD_MAX`] characters of printable ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BarcodePayload(String);

impl BarcodePayload {
    /// Validate and construct a payload from raw input.
    pub fn new(payload: impl Into<String>) -> Result<Self, BarcodeValidationError> {
        let raw = payload.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BarcodeValidationError::EmptyPayload);
        }
        if trimmed.chars().count() > PAYLOAD_MAX {
            return Err(BarcodeValidationError::PayloadTooLong { max: PAYLOAD_MAX });
        }
        let printable = trimmed
            .chars()
            .all(|c| c.is_ascii() && !c.is_ascii_control());
        if !printable {
            return Err(BarcodeValidationError::PayloadNotAscii);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Payload as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BarcodePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BarcodePayload> for String {
    fn from(value: BarcodePayload) -> Self {
        value.0
    }
}

impl TryFrom<String> for BarcodePayload {
    type Error = BarcodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Request to persist a new barcode; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBarcode {
    pub owner_id: UserId,
    pub payload: BarcodePayload,
    pub symbology: Symbology,
}

/// Persisted barcode record.
///
/// Every field is immutable after creation. `owner_id` is never absent; the
/// record is visible and deletable only through its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeRecord {
    id: Uuid,
    owner_id: UserId,
    payload: BarcodePayload,
    symbology: Symbology,
    created_at: DateTime<Utc>,
}

impl BarcodeRecord {
    /// Reassemble a record from store-provided parts.
    ///
    /// Adapters call this when hydrating rows so that invariant-violating
    /// rows are rejected instead of leaking into the domain.
    pub fn from_parts(
        id: Uuid,
        owner_id: UserId,
        payload: BarcodePayload,
        symbology: Symbology,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            payload,
            symbology,
            created_at,
        }
    }

    /// Store-assigned record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Identity that created, and solely controls, the record.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Encoded text content.
    pub fn payload(&self) -> &BarcodePayload {
        &self.payload
    }

    /// Barcode format the payload was saved with.
    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    /// Store-assigned creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
