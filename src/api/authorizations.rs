//! AuthorizationsApi: effective permission checks

use crate::api::ApiContext;
use crate::core::error::Result;
use crate::models::{AccessCheck, Authorization, Model};
use reqwest::Method;
use serde_json::Value;

#[derive(Clone)]
pub struct AuthorizationsApi {
    ctx: ApiContext,
}

impl AuthorizationsApi {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Which of the requested permissions the caller holds, per ACL key
    pub async fn check_authorizations(&self, access_checks: &[AccessCheck]) -> Result<Vec<Authorization>> {
        if access_checks.is_empty() {
            return Err(self
                .ctx
                .invalid("accessChecks must be a non-empty array of valid AccessChecks"));
        }

        let body = Value::Array(access_checks.iter().map(Model::to_plain_record).collect());
        let request = self.ctx.request(Method::POST, "").json(body);
        self.ctx.send(request).await
    }
}
