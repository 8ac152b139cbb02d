//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BarcodeRenderer, LoginService};
use crate::domain::BarcodeLifecycle;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication use-case.
    pub login: Arc<dyn LoginService>,
    /// Ownership-scoped barcode operations.
    pub barcodes: BarcodeLifecycle,
    /// Rendering delegate for barcode images.
    pub renderer: Arc<dyn BarcodeRenderer>,
}

impl HttpState {
    /// Construct state from its ports.
    pub fn new(
        login: Arc<dyn LoginService>,
        barcodes: BarcodeLifecycle,
        renderer: Arc<dyn BarcodeRenderer>,
    ) -> Self {
        Self {
            login,
            barcodes,
            renderer,
        }
    }
}
