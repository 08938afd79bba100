//! Core module: errors, validation predicates and the HTTP transport seam

pub mod error;
pub mod http;
pub mod validation;

pub use error::{ConfigError, LatticeError, ModelError, Result};
pub use http::{ApiRequest, ApiResponse, HttpClient, ReqwestClient, RequestBody};
