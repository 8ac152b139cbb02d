//! Port for the barcode rendering delegate.
//!
//! Symbol encoding is delegated wholesale to an external library; the
//! domain only pins down the contract: rendering is a pure function of the
//! stored payload and symbology, so every view or download of a record
//! reproduces an identical image.

use crate::domain::{BarcodePayload, Symbology};

/// Errors raised by the rendering delegate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The payload cannot be encoded in the requested symbology.
    #[error("payload cannot be encoded as {symbology}: {message}")]
    Unencodable {
        symbology: String,
        message: String,
    },
}

impl RenderError {
    /// Create an unencodable error for the given symbology.
    pub fn unencodable(symbology: Symbology, message: impl Into<String>) -> Self {
        Self::Unencodable {
            symbology: symbology.as_str().to_owned(),
            message: message.into(),
        }
    }
}

/// A rendered barcode image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBarcode {
    /// IANA media type of `bytes`.
    pub media_type: &'static str,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// Port for producing barcode images from validated inputs.
#[cfg_attr(test, mockall::automock)]
pub trait BarcodeRenderer: Send + Sync {
    /// Render `payload` in the given symbology.
    ///
    /// Must be deterministic: identical inputs produce bit-identical bytes.
    fn render(
        &self,
        payload: &BarcodePayload,
        symbology: Symbology,
    ) -> Result<RenderedBarcode, RenderError>;
}
