//! SVG barcode renderer delegating symbol encoding to `barcoders`.
//!
//! Rendering is a pure function of the payload and symbology: no clock, no
//! randomness, no per-call state. The same record therefore renders to
//! bit-identical bytes on every view and download.

use barcoders::generators::svg::SVG;
use barcoders::sym::codabar::Codabar;
use barcoders::sym::code128::Code128;
use barcoders::sym::code39::Code39;
use barcoders::sym::ean13::EAN13;
use barcoders::sym::ean8::EAN8;
use barcoders::sym::tf::TF;

use crate::domain::ports::{BarcodeRenderer, RenderError, RenderedBarcode};
use crate::domain::{BarcodePayload, Symbology};

/// Rendered bar height in pixels.
const BAR_HEIGHT: u32 = 80;

/// Code 128 character-set selector prefixed to free-text payloads.
///
/// `barcoders` requires the caller to pick an initial character set;
/// set B covers the full printable-ASCII payload charset.
const CODE128_CHARSET_B: char = '\u{0181}';

/// Media type of every rendered image.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// `BarcodeRenderer` producing SVG documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgBarcodeRenderer;

impl SvgBarcodeRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self
    }
}

fn encode(payload: &BarcodePayload, symbology: Symbology) -> Result<Vec<u8>, RenderError> {
    let data = payload.as_str();
    let unencodable =
        |err: barcoders::error::Error| RenderError::unencodable(symbology, err.to_string());
    match symbology {
        Symbology::Code128 => Code128::new(format!("{CODE128_CHARSET_B}{data}"))
            .map(|code| code.encode())
            .map_err(unencodable),
        Symbology::Code39 => Code39::new(data).map(|code| code.encode()).map_err(unencodable),
        Symbology::Codabar => Codabar::new(data)
            .map(|code| code.encode())
            .map_err(unencodable),
        Symbology::Ean13 => EAN13::new(data).map(|code| code.encode()).map_err(unencodable),
        Symbology::Ean8 => EAN8::new(data).map(|code| code.encode()).map_err(unencodable),
        Symbology::Itf => TF::interleaved(data)
            .map(|code| code.encode())
            .map_err(unencodable),
    }
}

impl BarcodeRenderer for SvgBarcodeRenderer {
    fn render(
        &self,
        payload: &BarcodePayload,
        symbology: Symbology,
    ) -> Result<RenderedBarcode, RenderError> {
        let bars = encode(payload, symbology)?;
        let document = SVG::new(BAR_HEIGHT)
            .generate(&bars[..])
            .map_err(|err| RenderError::unencodable(symbology, err.to_string()))?;
        Ok(RenderedBarcode {
            media_type: SVG_MEDIA_TYPE,
            bytes: document.into_bytes(),
        })
    }
}
