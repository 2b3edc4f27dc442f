//! Error types for the catalog client.
//!
//! This module defines the centralized error type [`MarqueeError`] and a type alias
//! [`Result`] used throughout the crate. Every failure is scoped to the operation
//! that triggered it: read failures are folded into query state by the cache layer,
//! write failures are returned to the caller and rendered inline by the form.

use thiserror::Error;

/// Fallback text shown in a form when the server gave no usable detail.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// The main error type for catalog operations.
///
/// Variants follow the failure taxonomy of the REST collaborator: the request never
/// got an answer ([`Transport`](Self::Transport)), the answer was a non-2xx status
/// ([`Status`](Self::Status)), or a single-entity fetch found nothing
/// ([`NotFound`](Self::NotFound)). The remaining variants cover local failures.
///
/// # Examples
///
/// ```
/// use marquee::MarqueeError;
///
/// let err = MarqueeError::Status { status: 422, detail: Some("title is required".into()) };
/// assert_eq!(err.user_message(), "title is required");
/// ```
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// The request could not be sent or no response arrived.
    ///
    /// Covers connection refusals, DNS failures, and timeouts.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    ///
    /// `detail` carries the server-supplied explanation when the body had one
    /// (validation failures put their message here).
    #[error("Backend returned HTTP {status}{}", detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied detail text, if any.
        detail: Option<String>,
    },

    /// A single-entity fetch returned nothing.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"movie"`.
        entity: &'static str,
        /// Requested identifier.
        id: i64,
    },

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A write payload failed client-side validation; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// Returns the text a form should display for this failure.
    ///
    /// Server detail wins when present; validation messages are shown verbatim;
    /// everything else collapses to [`GENERIC_ERROR_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            Self::Validation(message) => message.clone(),
            Self::NotFound { entity, .. } => format!("The {entity} no longer exists"),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether this failure means "no such entity" rather than "request failed".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for MarqueeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MarqueeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, MarqueeError>;
