//! PermissionsApi: reading and mutating ACLs

use crate::api::ApiContext;
use crate::core::error::Result;
use crate::models::{Acl, AclData, Model};
use reqwest::Method;
use serde_json::{Value, json};

const EXPLAIN_PATH: &str = "explain";
const UPDATE_PATH: &str = "update";

#[derive(Clone)]
pub struct PermissionsApi {
    ctx: ApiContext,
}

impl PermissionsApi {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// ACL of the securable object identified by `acl_key`
    ///
    /// The key is an ordered path and is sent as given.
    pub async fn get_acl(&self, acl_key: &[&str]) -> Result<Acl> {
        self.ctx.check_uuids("aclKey", acl_key)?;

        let request = self.ctx.request(Method::POST, "").json(json!(acl_key));
        self.ctx.send(request).await
    }

    /// ACL entries together with the principals each permission comes from
    pub async fn get_acl_explanation(&self, acl_key: &[&str]) -> Result<Value> {
        self.ctx.check_uuids("aclKey", acl_key)?;

        let request = self
            .ctx
            .request(Method::POST, EXPLAIN_PATH)
            .json(json!(acl_key));
        self.ctx.send(request).await
    }

    pub async fn update_acl(&self, acl_data: &AclData) -> Result<()> {
        let request = self
            .ctx
            .request(Method::PATCH, "")
            .json(acl_data.to_plain_record());
        self.ctx.send_discarding(request).await
    }

    /// Apply several ACL mutations in one request
    pub async fn update_acls(&self, acl_data: &[AclData]) -> Result<()> {
        if acl_data.is_empty() {
            return Err(self
                .ctx
                .invalid("aclData must be an array of valid AclData objects"));
        }

        let body = Value::Array(acl_data.iter().map(Model::to_plain_record).collect());
        let request = self.ctx.request(Method::PATCH, UPDATE_PATH).json(body);
        self.ctx.send_discarding(request).await
    }
}
