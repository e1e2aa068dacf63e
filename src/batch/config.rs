use std::path::PathBuf;

use crate::filter::policy::FilterPolicy;
use crate::foundation::core::{DEFAULT_RENDER_WIDTH, MAX_RENDER_WIDTH, Wallet};
use crate::foundation::error::{QqlError, QqlResult};
use crate::seed::derive::TwoRings;
use crate::traits::resolve::{PaletteOverride, TraitSource};

/// Whether accepted renders are recorded in a store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Persistence {
    /// No store.
    #[default]
    Disabled,
    /// Record every accepted render under `host`.
    Enabled {
        /// Host label stored with each row.
        host: String,
    },
}

impl Persistence {
    /// Translate the raw `--use_db` / `--render_host` pair.
    pub fn from_flags(use_db: bool, host: Option<&str>) -> QqlResult<Self> {
        if !use_db {
            return Ok(Self::Disabled);
        }
        match host.map(str::trim) {
            Some(h) if !h.is_empty() => Ok(Self::Enabled {
                host: h.to_string(),
            }),
            _ => Err(QqlError::config(
                "--render_host is required when --use_db is enabled",
            )),
        }
    }

    /// Host label when enabled.
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::Disabled => None,
            Self::Enabled { host } => Some(host),
        }
    }
}

/// Every parameter of one batch run. Built once, then only read.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Wallet used as seed entropy.
    pub wallet: Wallet,
    /// Trait source.
    pub traits: TraitSource,
    /// Directory of named trait-set JSON files.
    pub traits_dir: PathBuf,
    /// Number of attempts.
    pub count: u32,
    /// Two-rings seed mutation.
    pub two_rings: TwoRings,
    /// Palette override for named trait-sets.
    pub palette_override: Option<PaletteOverride>,
    /// Acceptance criteria.
    pub filter: FilterPolicy,
    /// Overlay asset; `Some` enables the decorated `yun_` output.
    pub overlay: Option<PathBuf>,
    /// Keep the uncompressed PNG next to the WebP.
    pub keep_png: bool,
    /// Store toggle and host label.
    pub persistence: Persistence,
    /// Render width in pixels.
    pub render_width: u32,
}

impl BatchConfig {
    /// Configuration with defaults for everything but the required inputs.
    pub fn new(output_dir: impl Into<PathBuf>, wallet: Wallet, count: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            wallet,
            traits: TraitSource::Random,
            traits_dir: PathBuf::from("traits"),
            count,
            two_rings: TwoRings::No,
            palette_override: None,
            filter: FilterPolicy::accept_all(),
            overlay: None,
            keep_png: false,
            persistence: Persistence::Disabled,
            render_width: DEFAULT_RENDER_WIDTH,
        }
    }

    /// Reject settings that cannot produce a run.
    pub fn validate(&self) -> QqlResult<()> {
        if self.render_width == 0 {
            return Err(QqlError::config("render width must be non-zero"));
        }
        if self.render_width > MAX_RENDER_WIDTH {
            return Err(QqlError::config(format!(
                "render width {} exceeds the maximum of {MAX_RENDER_WIDTH}",
                self.render_width
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(QqlError::config("output directory must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/config.rs"]
mod tests;
