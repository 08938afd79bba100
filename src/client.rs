//! Entry point tying the configuration, the transport and the API structs together

use crate::api::{
    ApiContext, AuthorizationsApi, DataApi, EntityDataModelApi, LinkingApi, OrganizationsApi,
    PermissionsApi, UsersApi,
};
use crate::config::{ApiName, Configuration};
use crate::core::error::Result;
use crate::core::http::{HttpClient, ReqwestClient};
use std::sync::Arc;

/// Client for every platform API
///
/// Cloning is cheap; clones share the transport and the configuration.
///
/// ```rust,ignore
/// use lattice::prelude::*;
///
/// let config = Configuration::new("production")?.with_auth_token(&token);
/// let client = LatticeClient::new(config)?;
/// let organizations = client.organizations().get_all_organizations().await?;
/// ```
#[derive(Clone)]
pub struct LatticeClient {
    config: Arc<Configuration>,
    http: Arc<dyn HttpClient>,
}

impl LatticeClient {
    /// Create a client sending requests through `reqwest`
    pub fn new(config: Configuration) -> Result<Self> {
        let config = Arc::new(config);
        let http = Arc::new(ReqwestClient::new(config.clone())?);
        Ok(Self { config, http })
    }

    /// Create a client over a custom transport
    pub fn with_http_client(config: Configuration, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    fn context(&self, api: ApiName) -> ApiContext {
        ApiContext::new(api, self.http.clone(), self.config.clone())
    }

    pub fn authorizations(&self) -> AuthorizationsApi {
        AuthorizationsApi::new(self.context(ApiName::Authorizations))
    }

    pub fn data(&self) -> DataApi {
        DataApi::new(self.context(ApiName::Data))
    }

    pub fn edm(&self) -> EntityDataModelApi {
        EntityDataModelApi::new(self.context(ApiName::EntityDataModel))
    }

    pub fn linking(&self) -> LinkingApi {
        LinkingApi::new(self.context(ApiName::Linking))
    }

    pub fn organizations(&self) -> OrganizationsApi {
        OrganizationsApi::new(self.context(ApiName::Organizations))
    }

    pub fn permissions(&self) -> PermissionsApi {
        PermissionsApi::new(self.context(ApiName::Permissions))
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.context(ApiName::Users))
    }
}
