//! PNG snapshots of the surface and data-URL encoding.
//!
//! Supports encoding to `data:image/png;base64,...` and decoding back from
//! data URLs for verification.

use base64::Engine;
use image::{ImageEncoder, RgbaImage};

use crate::{CanvasError, CanvasResult};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// An encoded, immutable copy of the surface pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl Snapshot {
    /// Encode an RGBA buffer as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Encode`] if PNG encoding fails.
    pub fn encode(image: &RgbaImage) -> CanvasResult<Self> {
        let (width, height) = image.dimensions();
        let mut png = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png)
            .write_image(image.as_raw(), width, height, image::ColorType::Rgba8.into())
            .map_err(|e| CanvasError::Encode(format!("PNG encoding failed: {e}")))?;

        tracing::debug!("Snapshot encoded: {width}x{height}, {} bytes", png.len());
        Ok(Self { width, height, png })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The encoded PNG bytes.
    #[must_use]
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Render as a `data:image/png;base64,` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.png);
        format!("{PNG_DATA_URL_PREFIX}{encoded}")
    }

    /// Decode the PNG back into an RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Decode`] if the bytes are not a valid PNG.
    pub fn decode(&self) -> CanvasResult<RgbaImage> {
        decode_png(&self.png)
    }
}

/// Decode PNG bytes into an RGBA buffer.
///
/// # Errors
///
/// Returns [`CanvasError::Decode`] if the bytes are not a valid PNG.
pub fn decode_png(bytes: &[u8]) -> CanvasResult<RgbaImage> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| CanvasError::Decode(format!("Failed to decode PNG: {e}")))?;
    Ok(img.to_rgba8())
}

/// Decode a base64 PNG data URL into an RGBA buffer.
///
/// Accepts `data:image/png;base64,iVBORw0KGgo...`.
///
/// # Errors
///
/// Returns [`CanvasError::Decode`] if the URL is malformed, not base64, or
/// does not contain a PNG.
pub fn decode_data_url(url: &str) -> CanvasResult<RgbaImage> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CanvasError::Decode("Not a data URL".to_string()))?;

    let (metadata, encoded) = rest
        .split_once(',')
        .ok_or_else(|| CanvasError::Decode("Invalid data URL: missing comma".to_string()))?;

    if !metadata.starts_with("image/png") {
        return Err(CanvasError::Decode(format!(
            "Unsupported data URL media type: {metadata}"
        )));
    }
    if !metadata.ends_with(";base64") {
        return Err(CanvasError::Decode(
            "Data URL is not base64 encoded".to_string(),
        ));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| CanvasError::Decode(format!("Failed to decode base64: {e}")))?;

    decode_png(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn test_png_magic_bytes() {
        let snapshot = Snapshot::encode(&checker(4, 4)).expect("encode");
        // PNG magic bytes: \x89PNG
        assert_eq!(&snapshot.png_bytes()[0..4], &[137, 80, 78, 71]);
        assert_eq!((snapshot.width(), snapshot.height()), (4, 4));
    }

    #[test]
    fn test_data_url_prefix() {
        let snapshot = Snapshot::encode(&checker(2, 2)).expect("encode");
        assert!(snapshot.to_data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_data_url_decodes_to_same_pixels() {
        let original = checker(7, 3);
        let snapshot = Snapshot::encode(&original).expect("encode");
        let decoded = decode_data_url(&snapshot.to_data_url()).expect("decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_rejects_non_data_url() {
        let err = decode_data_url("http://example.com/a.png").unwrap_err();
        assert!(matches!(err, CanvasError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_missing_comma() {
        assert!(decode_data_url("data:image/png;base64").is_err());
    }

    #[test]
    fn test_decode_rejects_other_media_types() {
        assert!(decode_data_url("data:image/jpeg;base64,/9j/").is_err());
        assert!(decode_data_url("data:image/png,rawdata").is_err());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode_data_url("data:image/png;base64,!!!").is_err());
    }
}
