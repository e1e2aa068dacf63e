//! The trait catalog and its packed 28-bit seed encoding.
//!
//! Categories are packed most-significant first in [`CATALOG`] order. Each field stores the
//! index of the value within its category.

use std::collections::BTreeMap;

use rand::Rng;

use crate::foundation::core::{RING_VARIANT_FROM_END, RING_VARIANT_STANDARD, TRAIT_BLOCK_HEX_LEN};
use crate::foundation::error::{QqlError, QqlResult};

/// Key of the palette category, which the resolver can override.
pub const COLOR_PALETTE: &str = "colorPalette";

/// One trait category: its key, its value names, and its width in the trait code.
#[derive(Clone, Copy, Debug)]
pub struct Category {
    /// Key used in trait-set JSON.
    pub key: &'static str,
    /// Allowed values, in encoding order.
    pub values: &'static [&'static str],
    /// Bits reserved in the trait code.
    pub bits: u32,
}

const OFF_ON: &[&str] = &["Off", "On"];

/// All categories understood by seed derivation, in packing order.
pub const CATALOG: &[Category] = &[
    Category {
        key: "flowField",
        values: &[
            "Horizontal",
            "Diagonal",
            "Vertical",
            "Random Linear",
            "Explosive",
            "Spiral",
            "Circular",
            "Random Radial",
        ],
        bits: 3,
    },
    Category {
        key: "turbulence",
        values: &["None", "Low", "High"],
        bits: 2,
    },
    Category {
        key: "morphing",
        values: OFF_ON,
        bits: 1,
    },
    Category {
        key: COLOR_PALETTE,
        values: &[
            "Austin",
            "Berlin",
            "Edinburgh",
            "Fidenza",
            "Miami",
            "Seoul",
            "Seattle",
        ],
        bits: 3,
    },
    Category {
        key: "colorMode",
        values: &["Simple", "Stacked", "Zebra"],
        bits: 2,
    },
    Category {
        key: "colorVariety",
        values: &["Low", "Medium", "High"],
        bits: 2,
    },
    Category {
        key: "structure",
        values: &["Orbital", "Formation", "Shadows"],
        bits: 2,
    },
    Category {
        key: "bullseyeRings1",
        values: OFF_ON,
        bits: 1,
    },
    Category {
        key: "bullseyeRings3",
        values: OFF_ON,
        bits: 1,
    },
    Category {
        key: "bullseyeRings7",
        values: OFF_ON,
        bits: 1,
    },
    Category {
        key: "ringThickness",
        values: &["Thin", "Thick", "Mixed"],
        bits: 2,
    },
    Category {
        key: "ringSize",
        values: &["Small", "Medium", "Large"],
        bits: 2,
    },
    Category {
        key: "sizeVariety",
        values: &["Constant", "Variable", "Wild"],
        bits: 2,
    },
    Category {
        key: "spacing",
        values: &["Dense", "Medium", "Sparse"],
        bits: 2,
    },
    Category {
        key: "margin",
        values: &["None", "Crisp", "Wide"],
        bits: 2,
    },
];

/// Total width of the packed trait code.
pub const TRAIT_CODE_BITS: u32 = 28;

/// Look up a category by key.
pub fn category(key: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.key == key)
}

/// All palette names.
pub fn palettes() -> &'static [&'static str] {
    category(COLOR_PALETTE).map(|c| c.values).unwrap_or(&[])
}

/// Draw a uniformly random palette name.
pub fn random_palette(rng: &mut impl Rng) -> &'static str {
    let all = palettes();
    all[rng.gen_range(0..all.len())]
}

/// A mapping from trait category to trait value.
///
/// Keys outside [`CATALOG`] are carried along unchanged but never influence the seed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TraitSet(BTreeMap<String, String>);

impl TraitSet {
    /// An empty trait set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a trait value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a trait value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys the catalog does not know about.
    pub fn passthrough_keys(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| category(k).is_none())
            .collect()
    }

    /// Draw a value for every catalog category.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut out = Self::new();
        for c in CATALOG {
            out.insert(c.key, c.values[rng.gen_range(0..c.values.len())]);
        }
        out
    }
}

impl FromIterator<(String, String)> for TraitSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Packed catalog traits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraitCode(u32);

impl TraitCode {
    /// Pack the catalog traits of `traits`. Every category must be present with a known value.
    pub fn encode(traits: &TraitSet) -> QqlResult<Self> {
        let mut code = 0u32;
        for c in CATALOG {
            let value = traits.get(c.key).ok_or_else(|| {
                QqlError::config(format!("trait '{}' is missing from the trait set", c.key))
            })?;
            let idx = c.values.iter().position(|v| *v == value).ok_or_else(|| {
                QqlError::config(format!(
                    "unknown value '{value}' for trait '{}' (expected one of: {})",
                    c.key,
                    c.values.join(", ")
                ))
            })?;
            code = (code << c.bits) | idx as u32;
        }
        Ok(Self(code))
    }

    /// Unpack into a trait set containing exactly the catalog categories.
    pub fn decode(self) -> QqlResult<TraitSet> {
        let mut out = TraitSet::new();
        let mut shift = TRAIT_CODE_BITS;
        for c in CATALOG {
            shift -= c.bits;
            let idx = ((self.0 >> shift) & ((1 << c.bits) - 1)) as usize;
            let value = c.values.get(idx).ok_or_else(|| {
                QqlError::seed(format!("trait code {:07x} has no value {idx} for '{}'", self.0, c.key))
            })?;
            out.insert(c.key, *value);
        }
        Ok(out)
    }

    /// The code as seven hex nibbles, without the ring-variant nibble.
    pub fn nibbles(self) -> String {
        format!("{:07x}", self.0)
    }

    /// The eight-nibble seed trait block with the standard ring-variant nibble in place.
    pub fn to_block(self) -> String {
        let mut block = self.nibbles();
        block.insert(TRAIT_BLOCK_HEX_LEN - RING_VARIANT_FROM_END, RING_VARIANT_STANDARD);
        block
    }

    /// Recover the code from a seed trait block, skipping the ring-variant nibble.
    pub fn from_block(block: &str) -> QqlResult<Self> {
        if block.len() != TRAIT_BLOCK_HEX_LEN || !block.is_ascii() {
            return Err(QqlError::seed(format!("trait block '{block}' must be 8 hex digits")));
        }
        let at = TRAIT_BLOCK_HEX_LEN - RING_VARIANT_FROM_END;
        let nibbles = format!("{}{}", &block[..at], &block[at + 1..]);
        let code = u32::from_str_radix(&nibbles, 16)
            .map_err(|e| QqlError::seed(format!("trait block '{block}': {e}")))?;
        Ok(Self(code))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/traits/catalog.rs"]
mod tests;
