//! Typed error handling for the Lattice client
//!
//! Every API operation returns [`Result<T>`], whose error side is a
//! [`LatticeError`]. The variants separate failures detected locally (before
//! any request is sent) from failures reported by the transport or the remote
//! service, so callers can match on the category they care about.
//!
//! # Error Categories
//!
//! - [`LatticeError::InvalidParameter`]: an argument failed local validation
//! - [`ModelError`]: a model builder or plain record was rejected
//! - [`LatticeError::Http`]: the service answered with a non-2xx status
//! - [`LatticeError::Transport`]: the request never completed
//! - [`ConfigError`]: the client configuration is unusable
//!
//! # Example
//!
//! ```rust,ignore
//! match client.data().acquire_sync_ticket(esid, sync_id).await {
//!     Ok(ticket) => println!("ticket {ticket}"),
//!     Err(LatticeError::Http { status: 403, .. }) => println!("not allowed"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use crate::config::ApiName;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LatticeError>;

/// The main error type for the Lattice client
#[derive(Debug, Error)]
pub enum LatticeError {
    /// An argument failed local validation; no request was sent
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A model could not be built from the data at hand
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The service answered with a non-success status
    #[error("{api} request failed with status {status}: {body}")]
    Http {
        api: ApiName,
        status: u16,
        body: String,
    },

    /// The request could not be completed (connection, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected type
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The operation exists on the surface but the service does not expose it
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LatticeError {
    /// HTTP status carried by the error, if the service produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            LatticeError::Http { status, .. } => Some(*status),
            LatticeError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LatticeError::InvalidParameter(_) => "INVALID_PARAMETER",
            LatticeError::Model(e) => e.error_code(),
            LatticeError::Http { .. } => "HTTP_ERROR",
            LatticeError::Transport(_) => "TRANSPORT_ERROR",
            LatticeError::Decode(_) => "DECODE_ERROR",
            LatticeError::NotImplemented(_) => "NOT_IMPLEMENTED",
            LatticeError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// True when the error was raised before any request left the client
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LatticeError::InvalidParameter(_)
                | LatticeError::Model(_)
                | LatticeError::NotImplemented(_)
                | LatticeError::Config(_)
        )
    }
}

// =============================================================================
// Model Errors
// =============================================================================

/// Errors raised by model builders and plain record parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A field value was present but did not pass validation
    #[error("invalid parameter: {field} {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// `build()` was called before a required field was set
    #[error("missing property: {field} is a required property")]
    MissingProperty { field: &'static str },

    /// The plain record handed to a model was not a JSON object
    #[error("invalid value: {model} must be built from an object")]
    NotAnObject { model: &'static str },
}

impl ModelError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        ModelError::MissingProperty { field }
    }

    /// Name of the offending field, when there is one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ModelError::InvalidParameter { field, .. } | ModelError::MissingProperty { field } => {
                Some(*field)
            }
            ModelError::NotAnObject { .. } => None,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ModelError::InvalidParameter { .. } => "INVALID_MODEL_FIELD",
            ModelError::MissingProperty { .. } => "MISSING_PROPERTY",
            ModelError::NotAnObject { .. } => "NOT_AN_OBJECT",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL is neither a known environment nor an absolute URL
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A zero timeout would fail every request
    #[error("invalid timeout: timeout_ms must be positive")]
    InvalidTimeout,

    /// The configuration document could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The configuration file could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying HTTP client could not be created
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}
