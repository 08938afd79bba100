//! Client configuration
//!
//! A [`Configuration`] is built once at startup, either in code or from YAML,
//! and handed to [`crate::LatticeClient`]. Every API resolves its own base URL
//! from it, so one deployment can route a single API elsewhere through
//! `api_overrides`.

use crate::core::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Known deployments, usable in place of a base URL
pub const ENVIRONMENTS: &[(&str, &str)] = &[
    ("localhost", "http://localhost:8080"),
    ("staging", "https://api.staging.openlattice.com"),
    ("production", "https://api.openlattice.com"),
];

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// The REST APIs exposed by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiName {
    Authorizations,
    Data,
    EntityDataModel,
    Linking,
    Organizations,
    Permissions,
    Users,
}

impl ApiName {
    pub const ALL: &'static [ApiName] = &[
        ApiName::Authorizations,
        ApiName::Data,
        ApiName::EntityDataModel,
        ApiName::Linking,
        ApiName::Organizations,
        ApiName::Permissions,
        ApiName::Users,
    ];

    /// Path segment under `/datastore`
    pub fn path(&self) -> &'static str {
        match self {
            ApiName::Authorizations => "authorizations",
            ApiName::Data => "data",
            ApiName::EntityDataModel => "edm",
            ApiName::Linking => "linking",
            ApiName::Organizations => "organizations",
            ApiName::Permissions => "permissions",
            ApiName::Users => "principals",
        }
    }
}

impl fmt::Display for ApiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiName::Authorizations => "AuthorizationsApi",
            ApiName::Data => "DataApi",
            ApiName::EntityDataModel => "EntityDataModelApi",
            ApiName::Linking => "LinkingApi",
            ApiName::Organizations => "OrganizationsApi",
            ApiName::Permissions => "PermissionsApi",
            ApiName::Users => "UsersApi",
        };
        f.write_str(name)
    }
}

/// Settings shared by every API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Absolute URL, or one of the names in [`ENVIRONMENTS`]
    pub base_url: String,

    /// Token sent as `Authorization: Bearer <token>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Base URLs replacing `{base_url}/datastore/{api}` for specific APIs
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub api_overrides: HashMap<ApiName, String>,

    /// Per-request timeout in milliseconds; must be positive
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Configuration {
    /// Create a configuration for `base_url` (an absolute URL or environment name)
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Self {
            base_url: base_url.to_string(),
            auth_token: None,
            api_overrides: HashMap::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
        .validated()
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Accepts a raw token or a full `Bearer <token>` header value
    pub fn with_auth_token(mut self, token: &str) -> Self {
        self.auth_token = normalize_token(token);
        self
    }

    pub fn with_api_base_url(mut self, api: ApiName, url: &str) -> Result<Self, ConfigError> {
        self.api_overrides.insert(api, parse_base_url(url)?);
        Ok(self)
    }

    /// Sub-millisecond durations round up to 1ms
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        self
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Base URL requests for `api` are resolved against, without trailing slash
    pub fn api_base_url(&self, api: ApiName) -> String {
        match self.api_overrides.get(&api) {
            Some(url) => url.clone(),
            None => format!("{}/datastore/{}", self.base_url, api.path()),
        }
    }

    /// Resolve environment names, check every URL and normalize the token
    fn validated(mut self) -> Result<Self, ConfigError> {
        let base_url = ENVIRONMENTS
            .iter()
            .find(|(name, _)| *name == self.base_url)
            .map(|(_, url)| url.to_string())
            .unwrap_or(self.base_url);
        self.base_url = parse_base_url(&base_url)?;
        self.api_overrides = self
            .api_overrides
            .into_iter()
            .map(|(api, url)| Ok((api, parse_base_url(&url)?)))
            .collect::<Result<_, ConfigError>>()?;
        self.auth_token = self.auth_token.as_deref().and_then(normalize_token);
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(self)
    }
}

fn parse_base_url(url: &str) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };
    let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment"));
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn normalize_token(token: &str) -> Option<String> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    (!token.is_empty()).then(|| token.to_string())
}
