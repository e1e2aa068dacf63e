use crate::render::backend::RenderMetadata;

/// Acceptance criteria applied to every render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Required background color name; `None` disables the check.
    pub background: Option<String>,
    /// Minimum point count; `0` disables the check.
    pub min_points: u64,
}

/// A single failed acceptance predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Background color differed from the required one.
    BackgroundMismatch {
        /// Color the policy asked for.
        wanted: String,
        /// Color the render produced.
        got: String,
    },
    /// Fewer points than the cutoff.
    TooFewPoints {
        /// Configured cutoff.
        min: u64,
        /// Points in the render.
        got: u64,
    },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BackgroundMismatch { wanted, got } => {
                write!(f, "backgroundColor mismatch: wanted {wanted}, got {got}")
            }
            Self::TooFewPoints { min, got } => {
                write!(f, "point count of {got} below cutoff of {min}")
            }
        }
    }
}

/// Outcome of filtering one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Every enabled predicate passed.
    Accepted,
    /// At least one predicate failed; all failures are listed.
    Rejected(Vec<Rejection>),
}

impl Verdict {
    /// True for [`Verdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl FilterPolicy {
    /// Policy that accepts everything.
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Evaluate every enabled predicate against `metadata`.
    pub fn evaluate(&self, metadata: &RenderMetadata) -> Verdict {
        let mut failed = Vec::new();
        if let Some(wanted) = &self.background
            && metadata.background_color != *wanted
        {
            failed.push(Rejection::BackgroundMismatch {
                wanted: wanted.clone(),
                got: metadata.background_color.clone(),
            });
        }
        if self.min_points > 0 && metadata.num_points < self.min_points {
            failed.push(Rejection::TooFewPoints {
                min: self.min_points,
                got: metadata.num_points,
            });
        }

        if failed.is_empty() {
            Verdict::Accepted
        } else {
            for reason in &failed {
                tracing::info!("{reason} ... skipping render");
            }
            Verdict::Rejected(failed)
        }
    }

    /// Boolean form of [`FilterPolicy::evaluate`].
    pub fn accept(&self, metadata: &RenderMetadata) -> bool {
        self.evaluate(metadata).is_accepted()
    }
}

/// Translate the raw `--bg_color_override` token; `none` disables the check.
pub fn background_from_arg(raw: &str) -> Option<String> {
    match raw {
        "none" => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/policy.rs"]
mod tests;
