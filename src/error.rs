//! Error types for Cloud Projects API operations.

use thiserror::Error;

use crate::models::DefinitionFamily;

/// Errors that can occur during Cloud Projects API operations.
#[derive(Debug, Error)]
pub enum ProjectsError {
    /// Configuration is missing or incomplete.
    #[error("Cloud Projects configuration required: {0}")]
    ConfigMissing(String),

    /// A caller-supplied argument was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request failed.
    #[error("Cloud Projects API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// `get_next` was called on a pager that has no further pages.
    #[error("No more pages: the pager is exhausted")]
    Exhausted,

    /// A polymorphic payload could not be resolved to a variant.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors produced while resolving a configuration definition payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload is not a JSON object.
    #[error("{family} definition must be a JSON object")]
    NotAnObject { family: DefinitionFamily },

    /// A field required by the resolved variant is absent or null.
    #[error("{family} definition is missing required field '{field}'")]
    MissingField {
        family: DefinitionFamily,
        field: &'static str,
    },

    /// No signal field was present and the family has no default variant.
    #[error("{family} definition matches no variant: expected one of {expected:?}")]
    Unresolved {
        family: DefinitionFamily,
        expected: &'static [&'static str],
    },

    /// Signal fields of more than one variant were present.
    #[error("{family} definition is ambiguous: conflicting fields {fields:?}")]
    Ambiguous {
        family: DefinitionFamily,
        fields: Vec<&'static str>,
    },

    /// A field was present but had the wrong shape.
    #[error("{family} definition has an invalid field: {message}")]
    InvalidField {
        family: DefinitionFamily,
        message: String,
    },
}

/// Result type alias for Cloud Projects operations.
pub type Result<T> = core::result::Result<T, ProjectsError>;
