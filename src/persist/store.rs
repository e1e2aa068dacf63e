use std::path::{Path, PathBuf};

use crate::foundation::core::Seed;
use crate::foundation::error::QqlResult;
use crate::render::backend::RenderMetadata;

/// One recorded render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderRow {
    /// Host label of the machine that rendered it.
    pub host: String,
    /// Absolute output directory.
    pub output_dir: PathBuf,
    /// Base file name (`<timestamp>-<seed>.png`).
    pub filename: String,
    /// Seed string.
    pub seed: String,
    /// Render width in pixels.
    pub render_width: u32,
    /// Full render metadata.
    pub metadata: RenderMetadata,
}

impl RenderRow {
    /// Store key: host, directory and file name joined with `|`.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.host, self.output_dir.display(), self.filename)
    }
}

/// Records accepted renders.
///
/// Called once per written output, after its files exist.
pub trait RenderStore {
    /// Record one render.
    fn insert(
        &mut self,
        host: &str,
        output_dir: &Path,
        filename: &str,
        seed: &Seed,
        render_width: u32,
        metadata: &RenderMetadata,
    ) -> QqlResult<()>;
}

pub(crate) fn make_row(
    host: &str,
    output_dir: &Path,
    filename: &str,
    seed: &Seed,
    render_width: u32,
    metadata: &RenderMetadata,
) -> RenderRow {
    RenderRow {
        host: host.to_string(),
        output_dir: output_dir.to_path_buf(),
        filename: filename.to_string(),
        seed: seed.to_string(),
        render_width,
        metadata: metadata.clone(),
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<RenderRow>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[RenderRow] {
        &self.rows
    }
}

impl RenderStore for MemoryStore {
    fn insert(
        &mut self,
        host: &str,
        output_dir: &Path,
        filename: &str,
        seed: &Seed,
        render_width: u32,
        metadata: &RenderMetadata,
    ) -> QqlResult<()> {
        self.rows.push(make_row(
            host,
            output_dir,
            filename,
            seed,
            render_width,
            metadata,
        ));
        Ok(())
    }
}
