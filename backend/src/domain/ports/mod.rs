//! Domain ports and supporting types for the hexagonal boundary.

mod barcode_renderer;
mod barcode_repository;
mod login_service;

#[cfg(test)]
pub use barcode_renderer::MockBarcodeRenderer;
pub use barcode_renderer::{BarcodeRenderer, RenderError, RenderedBarcode};
#[cfg(test)]
pub use barcode_repository::MockBarcodeRepository;
pub use barcode_repository::{BarcodeRepository, BarcodeRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
