use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{QqlError, QqlResult};

/// Hex digits in a wallet address (20 bytes).
pub const WALLET_HEX_LEN: usize = 40;
/// Hex digits of seed entropy (8 bytes).
pub const ENTROPY_HEX_LEN: usize = 16;
/// Hex digits in the trailing trait block.
pub const TRAIT_BLOCK_HEX_LEN: usize = 8;
/// Total seed length including the `0x` prefix.
pub const SEED_LEN: usize = 2 + WALLET_HEX_LEN + ENTROPY_HEX_LEN + TRAIT_BLOCK_HEX_LEN;
/// Offset of the ring-variant nibble, counted from the end of the seed.
pub const RING_VARIANT_FROM_END: usize = 4;
/// Ring-variant nibble written by base derivation.
pub const RING_VARIANT_STANDARD: char = '0';
/// Ring-variant sentinel selecting the two-rings rendering variant.
pub const RING_VARIANT_TWO_RINGS: char = 'e';
/// Render width used when none is configured.
pub const DEFAULT_RENDER_WIDTH: u32 = 1200;

/// Widest render accepted by a batch.
pub const MAX_RENDER_WIDTH: u32 = 16_384;

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// An Ethereum-style wallet address, used only as entropy input.
///
/// Only the textual shape is checked (`0x` + 40 hex digits); checksums are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wallet(String);

impl Wallet {
    /// Parse a wallet address. Case-insensitive; the `0x` prefix is required.
    pub fn parse(s: &str) -> QqlResult<Self> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| QqlError::seed(format!("wallet '{s}' must start with 0x")))?;
        let hex = hex.to_ascii_lowercase();
        if hex.len() != WALLET_HEX_LEN || !is_lower_hex(&hex) {
            return Err(QqlError::seed(format!(
                "wallet '{s}' must be 0x followed by {WALLET_HEX_LEN} hex digits"
            )));
        }
        Ok(Self(hex))
    }

    /// Lowercase hex digits without the `0x` prefix.
    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.0)
    }
}

impl FromStr for Wallet {
    type Err = QqlError;

    fn from_str(s: &str) -> QqlResult<Self> {
        Self::parse(s)
    }
}

/// A render seed: `0x` + wallet (40) + entropy (16) + trait block (8), all lowercase hex.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct Seed(String);

impl Seed {
    /// Parse a seed string, normalizing to lowercase.
    pub fn parse(s: &str) -> QqlResult<Self> {
        let lower = s.to_ascii_lowercase();
        let Some(hex) = lower.strip_prefix("0x") else {
            return Err(QqlError::seed(format!("seed '{s}' must start with 0x")));
        };
        if lower.len() != SEED_LEN || !is_lower_hex(hex) {
            return Err(QqlError::seed(format!(
                "seed '{s}' must be 0x followed by {} hex digits",
                SEED_LEN - 2
            )));
        }
        Ok(Self(lower))
    }

    /// Assemble a seed from its parts. Callers guarantee each part is lowercase hex of the
    /// right width.
    pub(crate) fn from_parts(wallet: &Wallet, entropy: u64, trait_block: &str) -> Self {
        debug_assert_eq!(trait_block.len(), TRAIT_BLOCK_HEX_LEN);
        Self(format!("0x{}{entropy:016x}{trait_block}", wallet.hex()))
    }

    /// The full seed string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The wallet embedded in this seed.
    pub fn wallet(&self) -> Wallet {
        Wallet(self.0[2..2 + WALLET_HEX_LEN].to_string())
    }

    /// The 64-bit entropy segment.
    pub fn entropy(&self) -> QqlResult<u64> {
        let start = 2 + WALLET_HEX_LEN;
        let hex = &self.0[start..start + ENTROPY_HEX_LEN];
        u64::from_str_radix(hex, 16)
            .map_err(|e| QqlError::seed(format!("entropy segment '{hex}': {e}")))
    }

    /// The trailing trait block (8 hex digits, ring-variant nibble included).
    pub fn trait_block(&self) -> &str {
        &self.0[SEED_LEN - TRAIT_BLOCK_HEX_LEN..]
    }

    /// The ring-variant nibble at `len - 4`.
    pub fn ring_variant(&self) -> char {
        self.0.as_bytes()[SEED_LEN - RING_VARIANT_FROM_END] as char
    }

    /// True when the two-rings sentinel is present.
    pub fn is_two_rings(&self) -> bool {
        self.ring_variant() == RING_VARIANT_TWO_RINGS
    }

    /// Apply the two-rings mutation: replace the ring-variant nibble with the sentinel.
    ///
    /// Length-preserving; every other character is untouched.
    pub fn with_two_rings(&self) -> Self {
        let at = SEED_LEN - RING_VARIANT_FROM_END;
        let mut s = String::with_capacity(SEED_LEN);
        s.push_str(&self.0[..at]);
        s.push(RING_VARIANT_TWO_RINGS);
        s.push_str(&self.0[at + 1..]);
        Self(s)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Seed {
    type Err = QqlError;

    fn from_str(s: &str) -> QqlResult<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
