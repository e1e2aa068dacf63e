use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sha2::Digest as _;

use crate::foundation::core::{Seed, Wallet};
use crate::foundation::error::QqlResult;
use crate::traits::catalog::{TraitCode, TraitSet};

/// Whether derived seeds get the two-rings mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TwoRings {
    /// Apply the two-rings sentinel after derivation.
    Yes,
    /// Leave seeds untouched.
    #[default]
    No,
}

/// Derives seeds from a wallet and optional traits.
///
/// The trait path is a pure function of `(wallet, catalog traits)`; the random path draws from
/// the deriver's RNG.
pub struct SeedDeriver {
    rng: StdRng,
}

impl Default for SeedDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedDeriver {
    /// Deriver with an OS-seeded RNG.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deriver with a fixed RNG seed, for reproducible random runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// RNG used for random traits and random palettes.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Derive one seed.
    ///
    /// With `traits == None`, both the traits and the entropy are random.
    pub fn derive(
        &mut self,
        wallet: &Wallet,
        traits: Option<&TraitSet>,
        two_rings: TwoRings,
    ) -> QqlResult<Seed> {
        let seed = match traits {
            Some(traits) => derive_from_traits(wallet, traits)?,
            None => {
                let traits = TraitSet::random(&mut self.rng);
                let code = TraitCode::encode(&traits)?;
                Seed::from_parts(wallet, self.rng.next_u64(), &code.to_block())
            }
        };
        Ok(match two_rings {
            TwoRings::Yes => seed.with_two_rings(),
            TwoRings::No => seed,
        })
    }
}

/// Deterministic derivation from a wallet and its catalog traits.
pub fn derive_from_traits(wallet: &Wallet, traits: &TraitSet) -> QqlResult<Seed> {
    let code = TraitCode::encode(traits)?;
    Ok(Seed::from_parts(
        wallet,
        trait_entropy(wallet, code),
        &code.to_block(),
    ))
}

fn trait_entropy(wallet: &Wallet, code: TraitCode) -> u64 {
    let mut hasher = sha2::Sha256::new();
    hasher.update(wallet.hex().as_bytes());
    hasher.update(b":");
    hasher.update(code.nibbles().as_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

#[cfg(test)]
#[path = "../../tests/unit/seed/derive.rs"]
mod tests;
