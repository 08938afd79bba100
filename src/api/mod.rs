//! REST API wrappers
//!
//! One struct per platform API. Every operation follows the same steps:
//! validate arguments (failing with [`LatticeError::InvalidParameter`] before
//! anything is sent), build an [`ApiRequest`], send it through the shared
//! [`HttpClient`], then decode the body. Failures are logged with `tracing`
//! and returned; nothing is retried.

pub mod authorizations;
pub mod data;
pub mod edm;
pub mod linking;
pub mod organizations;
pub mod permissions;
pub mod users;

pub use authorizations::AuthorizationsApi;
pub use data::{DataApi, Entity, EntityData};
pub use edm::EntityDataModelApi;
pub use linking::LinkingApi;
pub use organizations::OrganizationsApi;
pub use permissions::PermissionsApi;
pub use users::UsersApi;

use crate::config::{ApiName, Configuration};
use crate::core::error::{LatticeError, Result};
use crate::core::http::{ApiRequest, HttpClient};
use crate::core::validation::{is_valid_uuid, is_valid_uuid_array};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// What every API struct holds: its name, the transport and the configuration
#[derive(Clone)]
pub(crate) struct ApiContext {
    api: ApiName,
    client: Arc<dyn HttpClient>,
    config: Arc<Configuration>,
}

impl ApiContext {
    pub fn new(api: ApiName, client: Arc<dyn HttpClient>, config: Arc<Configuration>) -> Self {
        Self {
            api,
            client,
            config,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Request for a fixed `route`; free-form values go in with `.segment(..)`
    pub fn request(&self, method: Method, route: &str) -> ApiRequest {
        ApiRequest::new(self.api, method).route(route)
    }

    /// Send `request` and decode the response body into `T`
    ///
    /// An empty body decodes as `null`; a body that is not JSON decodes as a
    /// JSON string.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.execute(request).await?;
        decode(&body).inspect_err(|e| {
            tracing::error!(api = %self.api, error = %e, "failed to decode response");
        })
    }

    /// Send `request`, checking the status but ignoring the body
    pub async fn send_discarding(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: ApiRequest) -> Result<String> {
        let method = request.method.clone();
        let path = request.path();
        let response = self.client.send(request).await.inspect_err(|e| {
            tracing::error!(api = %self.api, %method, %path, error = %e, "request failed");
        })?;

        if !response.is_success() {
            tracing::error!(
                api = %self.api,
                %method,
                %path,
                status = response.status,
                "request rejected"
            );
            return Err(LatticeError::Http {
                api: self.api,
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }

    // === argument guards ===

    /// Log and build the error for an argument that failed validation
    pub fn invalid(&self, message: impl Into<String>) -> LatticeError {
        let message = message.into();
        tracing::error!(api = %self.api, "invalid parameter: {message}");
        LatticeError::InvalidParameter(message)
    }

    pub fn check_uuid(&self, name: &str, value: &str) -> Result<()> {
        if is_valid_uuid(value) {
            Ok(())
        } else {
            Err(self.invalid(format!("{name} must be a valid UUID")))
        }
    }

    /// Required id list: non-empty, every element a valid UUID
    pub fn check_uuids(&self, name: &str, values: &[&str]) -> Result<()> {
        if is_valid_uuid_array(values) {
            Ok(())
        } else {
            Err(self.invalid(format!("{name} must be a non-empty array of valid UUIDs")))
        }
    }

    /// Optional id list: may be empty, otherwise every element a valid UUID
    pub fn check_optional_uuids(&self, name: &str, values: &[&str]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.check_uuids(name, values)
    }

    pub fn check_non_empty(&self, name: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            Err(self.invalid(format!("{name} must be a non-empty string")))
        } else {
            Ok(())
        }
    }

    pub fn check_non_empty_strings(&self, name: &str, values: &[&str]) -> Result<()> {
        if values.is_empty() || values.iter().any(|v| v.is_empty()) {
            Err(self.invalid(format!("{name} must be a non-empty array of strings")))
        } else {
            Ok(())
        }
    }

    /// Fixed failure for operations the service does not expose
    pub fn not_implemented(&self, function: &'static str) -> LatticeError {
        tracing::error!(api = %self.api, "{function} is not implemented");
        LatticeError::NotImplemented(function)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    if body.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    let value = serde_json::from_str::<Value>(body)
        .unwrap_or_else(|_| Value::String(body.trim().to_string()));
    Ok(serde_json::from_value(value)?)
}

/// Ordered, deduplicated copy of `values` as a JSON array
pub(crate) fn dedup(values: &[&str]) -> Value {
    let set: indexmap::IndexSet<&str> = values.iter().copied().collect();
    Value::from(set.into_iter().collect::<Vec<_>>())
}
