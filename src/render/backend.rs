use crate::foundation::core::Seed;
use crate::foundation::error::QqlResult;

/// A rendered image as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// A frame filled with one opaque color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Copy into an `image` buffer. `None` if the byte length does not match the dimensions.
    pub fn to_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }

    /// Build from an `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// Descriptive metadata returned alongside a render.
///
/// `backgroundColor` and `numPoints` drive filtering; every other key is carried through to the
/// sidecar and the store as-is.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetadata {
    /// Name of the background color chosen by the renderer.
    pub background_color: String,
    /// Number of points drawn.
    pub num_points: u64,
    /// Renderer-specific extra fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RenderMetadata {
    /// Metadata with no extra fields.
    pub fn new(background_color: impl Into<String>, num_points: u64) -> Self {
        Self {
            background_color: background_color.into(),
            num_points,
            extra: serde_json::Map::new(),
        }
    }
}

/// Output of one render call. Immutable once returned.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Raster data.
    pub frame: FrameRGBA,
    /// Render metadata.
    pub metadata: RenderMetadata,
}

/// A generative renderer: seed in, pixels and metadata out.
pub trait Renderer {
    /// Render `seed` at the given width. Height is up to the renderer.
    fn render(&mut self, seed: &Seed, width: u32) -> QqlResult<RenderResult>;
}
