//! Permission requests and their review status

use crate::core::error::ModelError;
use crate::models::types::{PermissionType, RequestStateType};
use crate::models::{Model, PlainRecord, Principal, parse_uuid_set, with_field};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// Request
// =============================================================================

/// Ask for permissions on the securable object identified by `acl_key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub acl_key: IndexSet<Uuid>,
    pub permissions: IndexSet<PermissionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    acl_key: Option<IndexSet<Uuid>>,
    permissions: Option<IndexSet<PermissionType>>,
    reason: Option<String>,
}

impl RequestBuilder {
    pub fn set_acl_key<I, S>(mut self, acl_key: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.acl_key = Some(parse_uuid_set("aclKey", acl_key)?);
        Ok(self)
    }

    pub fn set_permissions(
        mut self,
        permissions: impl IntoIterator<Item = PermissionType>,
    ) -> Result<Self, ModelError> {
        let permissions: IndexSet<_> = permissions.into_iter().collect();
        if permissions.is_empty() {
            return Err(ModelError::invalid(
                "permissions",
                "must be a non-empty array of permissions",
            ));
        }
        self.permissions = Some(permissions);
        Ok(self)
    }

    pub fn set_reason(mut self, reason: &str) -> Result<Self, ModelError> {
        if !reason.is_empty() {
            self.reason = Some(reason.to_string());
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Request, ModelError> {
        Ok(Request {
            acl_key: self.acl_key.ok_or(ModelError::missing("aclKey"))?,
            permissions: self.permissions.ok_or(ModelError::missing("permissions"))?,
            reason: self.reason,
        })
    }
}

impl Model for Request {
    type Builder = RequestBuilder;
    const NAME: &'static str = "Request";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = with_field(RequestBuilder::default(), record.strs("aclKey")?, |b, key| {
            b.set_acl_key(key)
        })?;
        let builder = with_field(
            builder,
            record.parse_all::<PermissionType>("permissions")?,
            |b, permissions| b.set_permissions(permissions),
        )?;
        with_field(builder, record.str("reason")?, RequestBuilder::set_reason)?.build()
    }

    fn to_builder(&self) -> RequestBuilder {
        RequestBuilder {
            acl_key: Some(self.acl_key.clone()),
            permissions: Some(self.permissions.clone()),
            reason: self.reason.clone(),
        }
    }
}

impl_model_deserialize!(Request);
model_predicates!(Request => is_valid_request, is_valid_request_array);

// =============================================================================
// RequestStatus
// =============================================================================

/// Where a request stands, and who made it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestStatus {
    pub request: Request,
    pub state: RequestStateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
}

impl RequestStatus {
    pub fn builder() -> RequestStatusBuilder {
        RequestStatusBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestStatusBuilder {
    request: Option<Request>,
    state: Option<RequestStateType>,
    principal: Option<Principal>,
}

impl RequestStatusBuilder {
    pub fn set_request(mut self, request: Request) -> Self {
        self.request = Some(request);
        self
    }

    pub fn set_state(mut self, state: RequestStateType) -> Self {
        self.state = Some(state);
        self
    }

    pub fn set_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn build(self) -> Result<RequestStatus, ModelError> {
        Ok(RequestStatus {
            request: self.request.ok_or(ModelError::missing("request"))?,
            state: self.state.ok_or(ModelError::missing("state"))?,
            principal: self.principal,
        })
    }
}

impl Model for RequestStatus {
    type Builder = RequestStatusBuilder;
    const NAME: &'static str = "RequestStatus";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = RequestStatusBuilder::default();
        if let Some(request) = record.model("request")? {
            builder = builder.set_request(request);
        }
        if let Some(state) = record.parse("state")? {
            builder = builder.set_state(state);
        }
        if let Some(principal) = record.model("principal")? {
            builder = builder.set_principal(principal);
        }
        builder.build()
    }

    fn to_builder(&self) -> RequestStatusBuilder {
        RequestStatusBuilder {
            request: Some(self.request.clone()),
            state: Some(self.state),
            principal: self.principal.clone(),
        }
    }
}

impl_model_deserialize!(RequestStatus);
model_predicates!(RequestStatus => is_valid_request_status, is_valid_request_status_array);
