use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use image::imageops::{self, FilterType};

use crate::foundation::core::Seed;
use crate::foundation::error::{QqlError, QqlResult};
use crate::output::encode::{PngEncoder, RasterEncoder};
use crate::render::backend::{FrameRGBA, RenderResult};

/// Prefix of decorated overlay outputs.
pub const OVERLAY_PREFIX: &str = "yun_";
/// Suffix of the base name; sidecars are `<base>.txt` regardless of the image encoding.
pub const BASE_SUFFIX: &str = ".png";

/// Files materialized for one accepted render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputRecord {
    /// Write time, also the first half of the base name.
    pub timestamp: DateTime<Utc>,
    /// Seed that produced the render.
    pub seed: Seed,
    /// `<timestamp>-<seed>.png`; the join key between files and the store.
    pub base_name: String,
    /// Compressed image (`<base>.<ext>`).
    pub image_path: PathBuf,
    /// Pretty-printed metadata (`<base>.txt`).
    pub sidecar_path: PathBuf,
    /// Uncompressed PNG, when kept.
    pub png_path: Option<PathBuf>,
    /// Overlay composite, when it was produced.
    pub overlay_path: Option<PathBuf>,
}

/// Base file name for a render written at `at`.
pub fn base_name(at: DateTime<Utc>, seed: &Seed) -> String {
    format!(
        "{}-{seed}{BASE_SUFFIX}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Writes accepted renders into an output directory.
///
/// Files are created with create-new semantics and never overwritten. Stamps issued by one
/// writer strictly increase at millisecond resolution.
pub struct OutputWriter<'a> {
    dir: PathBuf,
    encoder: &'a dyn RasterEncoder,
    overlay: Option<PathBuf>,
    keep_png: bool,
    last_stamp: Option<DateTime<Utc>>,
}

impl<'a> OutputWriter<'a> {
    /// Writer for `dir`, created if missing.
    pub fn new(dir: impl Into<PathBuf>, encoder: &'a dyn RasterEncoder) -> QqlResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            QqlError::write(format!("create output dir '{}': {e}", dir.display()))
        })?;
        Ok(Self {
            dir,
            encoder,
            overlay: None,
            keep_png: false,
            last_stamp: None,
        })
    }

    /// Composite `asset` onto every output as a best-effort extra file.
    pub fn with_overlay(mut self, asset: Option<PathBuf>) -> Self {
        self.overlay = asset;
        self
    }

    /// Also keep the uncompressed PNG.
    pub fn with_keep_png(mut self, keep: bool) -> Self {
        self.keep_png = keep;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one accepted render stamped with the current time.
    pub fn write(&mut self, seed: &Seed, result: &RenderResult) -> QqlResult<OutputRecord> {
        let at = self.next_stamp(Utc::now());
        self.write_at(at, seed, result)
    }

    fn next_stamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let now = truncate_millis(now);
        let at = match self.last_stamp {
            Some(last) if now <= last => last + TimeDelta::milliseconds(1),
            _ => now,
        };
        self.last_stamp = Some(at);
        at
    }

    pub(crate) fn write_at(
        &mut self,
        at: DateTime<Utc>,
        seed: &Seed,
        result: &RenderResult,
    ) -> QqlResult<OutputRecord> {
        let base = base_name(at, seed);
        let ext = self.encoder.extension();

        let image_path = self.dir.join(format!("{base}.{ext}"));
        let encoded = self.encoder.encode(&result.frame)?;
        write_new(&image_path, &encoded)?;

        let sidecar_path = self.dir.join(format!("{base}.txt"));
        let sidecar = serde_json::to_string_pretty(&result.metadata)
            .map_err(|e| QqlError::write(format!("serialize metadata: {e}")))?;
        write_new(&sidecar_path, sidecar.as_bytes())?;
        tracing::debug!(image = %image_path.display(), sidecar = %sidecar_path.display(), "wrote output");

        let png_path = if self.keep_png {
            let path = self.dir.join(&base);
            write_new(&path, &PngEncoder.encode(&result.frame)?)?;
            Some(path)
        } else {
            None
        };

        let overlay_path = self.overlay.as_deref().and_then(|asset| {
            let path = self.dir.join(format!("{OVERLAY_PREFIX}{base}.{ext}"));
            match self.write_overlay(asset, &result.frame, &path) {
                Ok(()) => Some(path),
                Err(e) => {
                    tracing::warn!(asset = %asset.display(), "overlay skipped: {e}");
                    None
                }
            }
        });

        Ok(OutputRecord {
            timestamp: at,
            seed: seed.clone(),
            base_name: base,
            image_path,
            sidecar_path,
            png_path,
            overlay_path,
        })
    }

    fn write_overlay(&self, asset: &Path, frame: &FrameRGBA, path: &Path) -> QqlResult<()> {
        let mut base = frame
            .to_image()
            .ok_or_else(|| QqlError::write("frame size does not match its pixel data"))?;
        let mark = image::open(asset)
            .map_err(|e| QqlError::write(format!("open overlay '{}': {e}", asset.display())))?
            .to_rgba8();
        if mark.width() == 0 || mark.height() == 0 {
            return Err(QqlError::write("overlay asset is empty"));
        }

        let target_w = (frame.width / 4).max(1);
        let target_h = ((mark.height() as u64 * target_w as u64) / mark.width() as u64).max(1) as u32;
        let mark = imageops::resize(&mark, target_w, target_h, FilterType::Triangle);
        let pad = (frame.width / 40) as i64;
        let x = frame.width as i64 - target_w as i64 - pad;
        let y = frame.height as i64 - target_h as i64 - pad;
        imageops::overlay(&mut base, &mark, x, y);

        let encoded = self.encoder.encode(&FrameRGBA::from_image(base))?;
        write_new(path, &encoded)
    }
}

fn truncate_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(t.timestamp_millis()).unwrap_or(t)
}

fn write_new(path: &Path, bytes: &[u8]) -> QqlResult<()> {
    let mut f = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| QqlError::write(format!("create '{}': {e}", path.display())))?;
    f.write_all(bytes)
        .map_err(|e| QqlError::write(format!("write '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/output/writer.rs"]
mod tests;
