/// Convenience result type used across qql-bulk.
pub type QqlResult<T> = Result<T, QqlError>;

/// Top-level error taxonomy used by the seed and batch APIs.
#[derive(thiserror::Error, Debug)]
pub enum QqlError {
    /// Invalid run configuration or trait data; fatal before any rendering.
    #[error("configuration error: {0}")]
    Config(String),

    /// A named trait-set could not be found.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Malformed seed or wallet text.
    #[error("seed error: {0}")]
    Seed(String),

    /// Failure reported by a render backend.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while materializing output files.
    #[error("write error: {0}")]
    Write(String),

    /// Failure while recording a render in the persistence store.
    #[error("persistence error: {0}")]
    Persist(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QqlError {
    /// Build a [`QqlError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`QqlError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`QqlError::Seed`] value.
    pub fn seed(msg: impl Into<String>) -> Self {
        Self::Seed(msg.into())
    }

    /// Build a [`QqlError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`QqlError::Write`] value.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Build a [`QqlError::Persist`] value.
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::Persist(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
