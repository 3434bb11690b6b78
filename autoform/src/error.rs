//! Error types for form definition loading and view rendering.
//!
//! Missing metadata, unresolvable ordering directives and prefix collisions
//! are not errors; they are handled silently where they occur.

/// Errors raised by the `autoform` crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A view was asked to render without a template or render override.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A form definition is structurally invalid.
    #[error("invalid form definition: {0}")]
    Definition(String),

    /// An ordering relation other than `before` or `after`.
    #[error("unknown ordering relation: '{0}' (expected 'before' or 'after')")]
    UnknownRelation(String),

    /// A form definition document could not be parsed.
    #[error("definition parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
