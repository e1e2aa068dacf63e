use std::path::PathBuf;

use rand::Rng;

use crate::foundation::error::{QqlError, QqlResult};
use crate::traits::catalog::{COLOR_PALETTE, TraitCode, TraitSet, palettes, random_palette};

/// Where a run's traits come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraitSource {
    /// Every attempt draws its own random traits.
    Random,
    /// A named trait-set file (`<traits_dir>/<name>.json`).
    Named(String),
}

impl TraitSource {
    /// Translate the raw CLI token (`random` or a name).
    pub fn from_arg(raw: &str) -> Self {
        if raw == "random" {
            Self::Random
        } else {
            Self::Named(raw.to_string())
        }
    }
}

/// Replacement for the `colorPalette` trait of a named trait-set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaletteOverride {
    /// A fresh random palette for every attempt.
    Random,
    /// A fixed palette name.
    Named(String),
}

impl PaletteOverride {
    /// Translate the raw CLI token (`random` or a palette name).
    pub fn from_arg(raw: &str) -> QqlResult<Self> {
        if raw == "random" {
            return Ok(Self::Random);
        }
        if !palettes().contains(&raw) {
            return Err(QqlError::config(format!(
                "unknown palette '{raw}' (expected 'random' or one of: {})",
                palettes().join(", ")
            )));
        }
        Ok(Self::Named(raw.to_string()))
    }
}

/// Traits resolved once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedTraits {
    /// Random mode: seeds are derived from the wallet alone.
    Random,
    /// A validated base trait-set plus the palette override to apply per attempt.
    Fixed {
        /// Trait-set as loaded (with a named palette override already applied).
        base: TraitSet,
        /// Redraw the palette for every attempt.
        random_palette: bool,
    },
}

impl ResolvedTraits {
    /// Traits for one attempt, or `None` in random mode.
    pub fn for_attempt(&self, rng: &mut impl Rng) -> Option<TraitSet> {
        match self {
            Self::Random => None,
            Self::Fixed {
                base,
                random_palette: false,
            } => Some(base.clone()),
            Self::Fixed {
                base,
                random_palette: true,
            } => {
                let mut traits = base.clone();
                traits.insert(COLOR_PALETTE, random_palette(rng));
                Some(traits)
            }
        }
    }

    /// The fixed palette of this run, if there is one.
    pub fn fixed_palette(&self) -> Option<&str> {
        match self {
            Self::Fixed {
                base,
                random_palette: false,
            } => base.get(COLOR_PALETTE),
            _ => None,
        }
    }
}

/// Loads named trait-sets from a directory of JSON files.
#[derive(Clone, Debug)]
pub struct TraitResolver {
    dir: PathBuf,
}

impl TraitResolver {
    /// Resolver reading `<dir>/<name>.json`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the run's trait source once.
    ///
    /// Named sets are validated against the catalog here so that a bad set fails the run before
    /// anything is rendered.
    pub fn resolve(
        &self,
        source: &TraitSource,
        palette: Option<&PaletteOverride>,
    ) -> QqlResult<ResolvedTraits> {
        let name = match source {
            TraitSource::Random => {
                if palette.is_some() {
                    tracing::warn!("palette override is ignored with random traits");
                }
                return Ok(ResolvedTraits::Random);
            }
            TraitSource::Named(name) => name,
        };

        let mut base = self.load(name)?;
        let random_palette = match palette {
            None => false,
            Some(PaletteOverride::Random) => true,
            Some(PaletteOverride::Named(p)) => {
                base.insert(COLOR_PALETTE, p.as_str());
                false
            }
        };

        TraitCode::encode(&base)
            .map_err(|e| QqlError::config(format!("trait-set '{name}': {e}")))?;
        let passthrough = base.passthrough_keys();
        if !passthrough.is_empty() {
            tracing::debug!(?passthrough, "trait-set '{name}' carries keys outside the catalog");
        }

        Ok(ResolvedTraits::Fixed {
            base,
            random_palette,
        })
    }

    fn load(&self, name: &str) -> QqlResult<TraitSet> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(QqlError::lookup(format!("invalid trait-set name '{name}'")));
        }
        let path = self.dir.join(format!("{name}.json"));
        let bytes = std::fs::read(&path).map_err(|e| {
            QqlError::lookup(format!(
                "trait-set '{name}' not found at '{}': {e}",
                path.display()
            ))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            QqlError::config(format!("parse trait-set '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/traits/resolve.rs"]
mod tests;
