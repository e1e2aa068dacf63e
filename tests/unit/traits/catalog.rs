use rand::SeedableRng as _;
use rand::rngs::StdRng;

use super::*;

fn sample() -> TraitSet {
    let mut t = TraitSet::new();
    for c in CATALOG {
        t.insert(c.key, *c.values.last().unwrap());
    }
    t
}

#[test]
fn catalog_packs_into_28_bits() {
    let total: u32 = CATALOG.iter().map(|c| c.bits).sum();
    assert_eq!(total, TRAIT_CODE_BITS);
    for c in CATALOG {
        assert!(c.values.len() <= 1 << c.bits, "{} overflows its field", c.key);
    }
}

#[test]
fn encode_decode_is_identity_on_catalog_traits() {
    let traits = sample();
    let code = TraitCode::encode(&traits).unwrap();
    assert_eq!(code.decode().unwrap(), traits);

    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..32 {
        let t = TraitSet::random(&mut rng);
        assert_eq!(TraitCode::encode(&t).unwrap().decode().unwrap(), t);
    }
}

#[test]
fn passthrough_keys_do_not_change_the_code() {
    let traits = sample();
    let mut extended = traits.clone();
    extended.insert("artistNote", "anything");
    assert_eq!(extended.passthrough_keys(), vec!["artistNote"]);
    assert_eq!(
        TraitCode::encode(&traits).unwrap(),
        TraitCode::encode(&extended).unwrap()
    );
}

#[test]
fn missing_or_unknown_values_fail() {
    let mut t = sample();
    t.insert("turbulence", "Extreme");
    let err = TraitCode::encode(&t).unwrap_err();
    assert!(err.to_string().contains("turbulence"));

    let mut partial = TraitSet::new();
    partial.insert("flowField", "Spiral");
    assert!(TraitCode::encode(&partial).is_err());
}

#[test]
fn trait_block_skips_variant_nibble() {
    let code = TraitCode::encode(&sample()).unwrap();
    let block = code.to_block();
    assert_eq!(block.len(), 8);
    assert_eq!(block.as_bytes()[4], b'0');
    assert_eq!(TraitCode::from_block(&block).unwrap(), code);

    let mut marked = block.clone();
    marked.replace_range(4..5, "e");
    assert_eq!(TraitCode::from_block(&marked).unwrap(), code);
}

#[test]
fn decode_rejects_out_of_range_fields() {
    // turbulence occupies bits 23..25; 0b11 is not a value.
    let bad = TraitCode(0b11 << 23);
    assert!(bad.decode().is_err());
}
