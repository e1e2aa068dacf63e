use super::*;
use crate::foundation::core::Wallet;
use crate::seed::derive::derive_from_traits;
use crate::traits::catalog::CATALOG;

fn sample_seed() -> (Seed, TraitSet) {
    let wallet = Wallet::parse("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd").unwrap();
    let mut traits = TraitSet::new();
    for c in CATALOG {
        traits.insert(c.key, c.values[c.values.len() / 2]);
    }
    (derive_from_traits(&wallet, &traits).unwrap(), traits)
}

#[test]
fn seed_is_found_in_every_output_name() {
    let (seed, _) = sample_seed();
    let base = format!("2024-03-01T10:20:30.456Z-{seed}.png");
    for name in [
        format!("{base}.webp"),
        format!("{base}.txt"),
        format!("yun_{base}.webp"),
        format!("/renders/run1/{base}.webp"),
    ] {
        assert_eq!(seed_from_filename(&name).unwrap(), seed, "{name}");
    }
}

#[test]
fn directory_seeds_do_not_shadow_the_file_name() {
    let (seed, _) = sample_seed();
    let other = format!("0x{}", "f".repeat(64));
    let path = format!("/renders/{other}/2024-03-01T10:20:30.456Z-{seed}.png.webp");
    assert_eq!(seed_from_filename(&path).unwrap(), seed);

    let bare_dir = format!("/renders/{other}/render.png");
    assert!(seed_from_filename(&bare_dir).is_err());
}

#[test]
fn names_without_a_seed_fail() {
    assert!(seed_from_filename("render.png").is_err());
    assert!(seed_from_filename("0x1234.png").is_err());
}

#[test]
fn reverse_round_trip_rederives_the_seed() {
    let (seed, traits) = sample_seed();
    let recovered = traits_from_seed(&seed).unwrap();
    assert_eq!(recovered, traits);
    assert_eq!(derive_from_traits(&seed.wallet(), &recovered).unwrap(), seed);
}
