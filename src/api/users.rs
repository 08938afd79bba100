//! UsersApi: user principals and their roles
//!
//! These calls fail like every other endpoint when the request fails; older
//! clients resolved them with no value instead.

use crate::api::{ApiContext, dedup};
use crate::core::error::Result;
use reqwest::Method;
use serde_json::Value;

const USERS_PATH: &str = "users";
const ROLES_PATH: &str = "roles";
const RESET_PATH: &str = "reset";

#[derive(Clone)]
pub struct UsersApi {
    ctx: ApiContext,
}

impl UsersApi {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Value> {
        self.ctx.check_non_empty("userId", user_id)?;

        let request = self.ctx.request(Method::GET, USERS_PATH).segment(user_id);
        self.ctx.send(request).await
    }

    pub async fn get_all_users(&self) -> Result<Value> {
        let request = self.ctx.request(Method::GET, USERS_PATH);
        self.ctx.send(request).await
    }

    pub async fn get_all_users_for_role(&self, role: &str) -> Result<Value> {
        self.ctx.check_non_empty("role", role)?;

        let request = self
            .ctx
            .request(Method::GET, USERS_PATH)
            .route(ROLES_PATH)
            .segment(role);
        self.ctx.send(request).await
    }

    pub async fn get_all_users_for_all_roles(&self) -> Result<Value> {
        let request = self
            .ctx
            .request(Method::GET, USERS_PATH)
            .route(ROLES_PATH);
        self.ctx.send(request).await
    }

    /// Replace every role held by `user_id` with `roles`
    pub async fn reset_user_roles(&self, user_id: &str, roles: &[&str]) -> Result<()> {
        self.ctx.check_non_empty("userId", user_id)?;
        if roles.iter().any(|r| r.is_empty()) {
            return Err(self.ctx.invalid("roles must be an array of non-empty strings"));
        }

        let request = self
            .ctx
            .request(Method::PATCH, USERS_PATH)
            .route(ROLES_PATH)
            .route(RESET_PATH)
            .segment(user_id)
            .json(dedup(roles));
        self.ctx.send_discarding(request).await
    }
}
