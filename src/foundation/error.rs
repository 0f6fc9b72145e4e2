/// Convenience result type used across the crate.
pub type SquarizeResult<T> = Result<T, SquarizeError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Propagation policy: [`Validation`](SquarizeError::Validation) failures are
/// batch-fatal and surfaced to the caller immediately.
/// [`Decode`](SquarizeError::Decode) and [`Context`](SquarizeError::Context)
/// failures are asset-local and handled by skipping the affected asset.
/// [`Packaging`](SquarizeError::Packaging) failures abort the export action
/// only, leaving in-memory state intact for retry.
#[derive(thiserror::Error, Debug)]
pub enum SquarizeError {
    /// A batch contained files outside the accepted-type allowlist. The
    /// message lists every offending file name.
    #[error("validation error: {0}")]
    Validation(String),

    /// An asset's bytes could not be parsed as vector markup or a raster
    /// image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A drawing surface could not be acquired for an asset.
    #[error("context error: {0}")]
    Context(String),

    /// Archive generation failed; no partial archive is produced.
    #[error("packaging error: {0}")]
    Packaging(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SquarizeError {
    /// Build a [`SquarizeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SquarizeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SquarizeError::Context`] value.
    pub fn context(msg: impl Into<String>) -> Self {
        Self::Context(msg.into())
    }

    /// Build a [`SquarizeError::Packaging`] value.
    pub fn packaging(msg: impl Into<String>) -> Self {
        Self::Packaging(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
