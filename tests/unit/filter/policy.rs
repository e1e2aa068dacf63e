use super::*;

fn meta(bg: &str, points: u64) -> RenderMetadata {
    RenderMetadata::new(bg, points)
}

#[test]
fn disabled_policy_accepts_anything() {
    let p = FilterPolicy::accept_all();
    assert!(p.accept(&meta("red", 0)));
    assert!(p.accept(&meta("", 1_000_000)));
}

#[test]
fn background_mismatch_rejects() {
    let p = FilterPolicy {
        background: Some("blue".into()),
        min_points: 0,
    };
    assert!(!p.accept(&meta("red", 10)));
    assert!(p.accept(&meta("blue", 10)));
}

#[test]
fn min_points_is_inclusive() {
    let p = FilterPolicy {
        background: None,
        min_points: 5,
    };
    assert!(!p.accept(&meta("red", 3)));
    assert!(p.accept(&meta("red", 5)));
}

#[test]
fn both_failures_are_reported() {
    let p = FilterPolicy {
        background: Some("blue".into()),
        min_points: 5,
    };
    let Verdict::Rejected(reasons) = p.evaluate(&meta("red", 3)) else {
        panic!("expected rejection");
    };
    assert_eq!(
        reasons,
        vec![
            Rejection::BackgroundMismatch {
                wanted: "blue".into(),
                got: "red".into()
            },
            Rejection::TooFewPoints { min: 5, got: 3 },
        ]
    );
    assert!(reasons[1].to_string().contains("below cutoff of 5"));
}

#[test]
fn none_token_disables_background() {
    assert_eq!(background_from_arg("none"), None);
    assert_eq!(background_from_arg("Cream"), Some("Cream".to_string()));
}
