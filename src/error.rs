//! Engine error taxonomy.
//!
//! Failures are distinguishable by kind so callers can decide whether to
//! abort a whole totals computation or present a partial result. Authoring
//! validation has its own error type in the `ruleset` module; this enum
//! covers the runtime paths.

use thiserror::Error;

use crate::assets::AssetId;

/// Errors surfaced by the rules engine and its collaborators.
#[derive(Error, Debug)]
pub enum EngineError {
    /// An asset id referenced by a character or by a `grants` list could not
    /// be resolved. Never silently skipped: dropping a grant would silently
    /// change game totals.
    #[error("unresolved asset reference: {0}")]
    UnresolvedAsset(AssetId),

    /// A stored asset record failed to decode against its declared type.
    /// Fatal at load time; already-loaded assets are not re-validated.
    #[error("malformed asset record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
