//! Recover seeds from output filenames and traits from seeds.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::core::Seed;
use crate::foundation::error::{QqlError, QqlResult};
use crate::traits::catalog::{TraitCode, TraitSet};

static SEED_IN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0[xX][0-9a-fA-F]{64}").expect("seed pattern compiles"));

/// Extract the seed embedded in an output filename or path.
///
/// Works for primary images, sidecars and `yun_` overlays alike. Only the final path
/// component is searched.
pub fn seed_from_filename(name: &str) -> QqlResult<Seed> {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    let m = SEED_IN_NAME
        .find(file_name)
        .ok_or_else(|| QqlError::seed(format!("no seed found in filename '{name}'")))?;
    Seed::parse(m.as_str())
}

/// Catalog traits encoded in `seed`. Inverse of trait-based derivation.
pub fn traits_from_seed(seed: &Seed) -> QqlResult<TraitSet> {
    TraitCode::from_block(seed.trait_block())?.decode()
}

#[cfg(test)]
#[path = "../../tests/unit/seed/reverse.rs"]
mod tests;
