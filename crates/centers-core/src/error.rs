// crates/centers-core/src/error.rs
use crate::flow::FlowStep;
use thiserror::Error;

/// Everything that can go wrong while talking to the centers API.
///
/// Every fetch in the crate returns this type, so callers can render a
/// failure instead of mistaking it for an empty list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The API answered 2xx but reported `success: false`.
    #[error("API reported failure: {message}")]
    Api { message: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::InvalidUrl(_) | FetchError::Api { .. } | FetchError::Decode(_) => false,
        }
    }
}

/// A drill-down action was attempted from a step that does not allow it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} while choosing a {step}")]
    WrongStep {
        action: &'static str,
        step: FlowStep,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API base url is not set (set {0} or pass --api-url)")]
    MissingBaseUrl(&'static str),

    #[error("invalid API base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid request timeout {0:?}")]
    InvalidTimeout(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
