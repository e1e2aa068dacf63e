use image::ImageEncoder as _;

use crate::foundation::error::{QqlError, QqlResult};
use crate::render::backend::FrameRGBA;

/// Compresses frames into a raster file format.
pub trait RasterEncoder {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;
    /// Encode one frame.
    fn encode(&self, frame: &FrameRGBA) -> QqlResult<Vec<u8>>;
}

fn check_len(frame: &FrameRGBA) -> QqlResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.width == 0 || frame.height == 0 {
        return Err(QqlError::write("cannot encode an empty frame"));
    }
    if frame.data.len() != expected {
        return Err(QqlError::write(format!(
            "frame is {}x{} but carries {} bytes (expected {expected})",
            frame.width,
            frame.height,
            frame.data.len()
        )));
    }
    Ok(())
}

/// Lossless WebP via the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebpEncoder;

impl RasterEncoder for WebpEncoder {
    fn extension(&self) -> &'static str {
        "webp"
    }

    fn encode(&self, frame: &FrameRGBA) -> QqlResult<Vec<u8>> {
        check_len(frame)?;
        let mut out = Vec::new();
        image::codecs::webp::WebPEncoder::new_lossless(&mut out)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| QqlError::write(format!("encode webp: {e}")))?;
        Ok(out)
    }
}

/// Uncompressed-source PNG, used when the original render is kept alongside the WebP.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngEncoder;

impl RasterEncoder for PngEncoder {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn encode(&self, frame: &FrameRGBA) -> QqlResult<Vec<u8>> {
        check_len(frame)?;
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| QqlError::write(format!("encode png: {e}")))?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/encode.rs"]
mod tests;
