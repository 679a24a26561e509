use thiserror::Error;

use crate::buckets::Bucket;
use crate::types::layout::Character;

/// Build-time failures. Every variant is fatal to the artifact being
/// generated and names the offending character and/or key; the fix is
/// always an edit to the layout definition.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed layout: {entry}: {reason}")]
    MalformedLayout { entry: String, reason: String },

    #[error("ambiguous binding: key '{key}' in the {bucket} bucket maps to both '{first}' and '{second}'")]
    AmbiguousBinding {
        key: String,
        bucket: Bucket,
        first: Character,
        second: Character,
    },

    #[error("missing romanization for '{0}'")]
    MissingRomanization(Character),

    #[error("unreachable composition target: '{target}' composes from '{source}', which is bound in no neutral or shift bucket")]
    UnreachableCompositionTarget { source: Character, target: Character },

    #[error("identifier collision: '{character}' was already assigned emitted-id {existing}")]
    IdentifierCollision { character: Character, existing: u16 },
}

impl BuildError {
    pub fn malformed(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedLayout {
            entry: entry.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
