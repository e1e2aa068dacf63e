use rand::SeedableRng as _;
use rand::rngs::StdRng;
use std::path::Path;

use super::*;
use crate::traits::catalog::CATALOG;

fn write_set(dir: &Path, name: &str, extra: &[(&str, &str)]) -> TraitSet {
    let mut t = TraitSet::new();
    for c in CATALOG {
        t.insert(c.key, c.values[0]);
    }
    for (k, v) in extra {
        t.insert(*k, *v);
    }
    std::fs::write(
        dir.join(format!("{name}.json")),
        serde_json::to_vec_pretty(&t).unwrap(),
    )
    .unwrap();
    t
}

#[test]
fn random_source_resolves_to_random() {
    let dir = tempfile::tempdir().unwrap();
    let r = TraitResolver::new(dir.path());
    assert_eq!(
        r.resolve(&TraitSource::Random, None).unwrap(),
        ResolvedTraits::Random
    );
    let mut rng = StdRng::seed_from_u64(1);
    assert!(ResolvedTraits::Random.for_attempt(&mut rng).is_none());
}

#[test]
fn named_set_loads_and_keeps_passthrough_keys() {
    let dir = tempfile::tempdir().unwrap();
    let written = write_set(dir.path(), "classic", &[("signature", "jz")]);
    let r = TraitResolver::new(dir.path());
    let resolved = r
        .resolve(&TraitSource::Named("classic".into()), None)
        .unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let traits = resolved.for_attempt(&mut rng).unwrap();
    assert_eq!(traits, written);
    assert_eq!(traits.get("signature"), Some("jz"));
}

#[test]
fn named_palette_override_replaces_palette() {
    let dir = tempfile::tempdir().unwrap();
    write_set(dir.path(), "classic", &[]);
    let r = TraitResolver::new(dir.path());
    let p = PaletteOverride::from_arg("Miami").unwrap();
    let resolved = r
        .resolve(&TraitSource::Named("classic".into()), Some(&p))
        .unwrap();
    assert_eq!(resolved.fixed_palette(), Some("Miami"));
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        resolved.for_attempt(&mut rng).unwrap().get(COLOR_PALETTE),
        Some("Miami")
    );
}

#[test]
fn random_palette_override_draws_per_attempt() {
    let dir = tempfile::tempdir().unwrap();
    write_set(dir.path(), "classic", &[]);
    let r = TraitResolver::new(dir.path());
    let resolved = r
        .resolve(
            &TraitSource::Named("classic".into()),
            Some(&PaletteOverride::Random),
        )
        .unwrap();
    assert_eq!(resolved.fixed_palette(), None);

    let mut rng = StdRng::seed_from_u64(5);
    let seen: std::collections::BTreeSet<String> = (0..64)
        .map(|_| {
            resolved
                .for_attempt(&mut rng)
                .unwrap()
                .get(COLOR_PALETTE)
                .unwrap()
                .to_string()
        })
        .collect();
    assert!(seen.len() > 1);
    assert!(seen.iter().all(|p| palettes().contains(&p.as_str())));
}

#[test]
fn unknown_name_is_a_lookup_error() {
    let dir = tempfile::tempdir().unwrap();
    let r = TraitResolver::new(dir.path());
    let err = r
        .resolve(&TraitSource::Named("nope".into()), None)
        .unwrap_err();
    assert!(matches!(err, QqlError::Lookup(_)));
}

#[test]
fn invalid_trait_values_fail_at_resolve() {
    let dir = tempfile::tempdir().unwrap();
    write_set(dir.path(), "broken", &[("spacing", "Cramped")]);
    let r = TraitResolver::new(dir.path());
    let err = r
        .resolve(&TraitSource::Named("broken".into()), None)
        .unwrap_err();
    assert!(matches!(err, QqlError::Config(_)));
}

#[test]
fn palette_override_tokens() {
    assert_eq!(
        PaletteOverride::from_arg("random").unwrap(),
        PaletteOverride::Random
    );
    assert!(PaletteOverride::from_arg("Atlantis").is_err());
    assert_eq!(TraitSource::from_arg("random"), TraitSource::Random);
    assert_eq!(
        TraitSource::from_arg("classic"),
        TraitSource::Named("classic".into())
    );
}
