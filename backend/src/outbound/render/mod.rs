//! Rendering adapters behind the [`crate::domain::ports::BarcodeRenderer`] port.

pub mod svg;

pub use svg::{SvgBarcodeRenderer, SVG_MEDIA_TYPE};
