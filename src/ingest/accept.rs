use crate::assets::decode::RawFile;
use crate::foundation::error::{SquarizeError, SquarizeResult};

/// Accepted file categories shared by all three ingestion sources.
pub const DEFAULT_ACCEPTED_TYPES: [&str; 6] =
    ["image/*", ".jpg", ".jpeg", ".png", ".webp", ".svg"];

/// Accepted-type allowlist: MIME types (exact or category wildcards such as
/// `image/*`) and/or extension suffixes (`.png`).
#[derive(Clone, Debug)]
pub struct AcceptList {
    entries: Vec<String>,
}

impl AcceptList {
    /// Build an allowlist from entries.
    pub fn new<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// The default image allowlist ([`DEFAULT_ACCEPTED_TYPES`]).
    pub fn images() -> Self {
        Self::new(DEFAULT_ACCEPTED_TYPES)
    }

    /// The raw allowlist entries.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// A candidate is accepted when its declared type matches an entry
    /// (exactly, or by category for `*/*`-style wildcards), or when its
    /// lowercased name ends with an entry with the wildcard stripped.
    pub fn accepts(&self, media_type: &str, name: &str) -> bool {
        if self.entries.iter().any(|e| {
            e == media_type
                || e.strip_suffix('*')
                    .is_some_and(|prefix| prefix.ends_with('/') && media_type.starts_with(prefix))
        }) {
            return true;
        }
        let lower = name.to_lowercase();
        self.entries
            .iter()
            .any(|e| lower.ends_with(&e.replace('*', "")))
    }

    /// Validate a whole batch. Any invalid candidate rejects the entire batch
    /// with a [`SquarizeError::Validation`] listing every offending name; no
    /// partial batch survives.
    pub fn validate_batch(&self, files: &[RawFile]) -> SquarizeResult<()> {
        let invalid: Vec<&str> = files
            .iter()
            .filter(|f| !self.accepts(&f.media_type, &f.name))
            .map(|f| f.name.as_str())
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(SquarizeError::validation(format!(
                "invalid file type(s): {}",
                invalid.join(", ")
            )))
        }
    }
}

impl Default for AcceptList {
    fn default() -> Self {
        Self::images()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/accept.rs"]
mod tests;
