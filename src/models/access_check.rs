use crate::core::error::ModelError;
use crate::models::types::PermissionType;
use crate::models::{Model, PlainRecord, parse_uuid_set, with_field};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Query for the caller's effective permissions on one securable object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheck {
    pub acl_key: IndexSet<Uuid>,
    pub permissions: IndexSet<PermissionType>,
}

impl AccessCheck {
    pub fn builder() -> AccessCheckBuilder {
        AccessCheckBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccessCheckBuilder {
    acl_key: Option<IndexSet<Uuid>>,
    permissions: Option<IndexSet<PermissionType>>,
}

impl AccessCheckBuilder {
    pub fn set_acl_key<I, S>(mut self, acl_key: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.acl_key = Some(parse_uuid_set("aclKey", acl_key)?);
        Ok(self)
    }

    pub fn set_permissions(mut self, permissions: impl IntoIterator<Item = PermissionType>) -> Self {
        self.permissions = Some(permissions.into_iter().collect());
        self
    }

    pub fn build(self) -> Result<AccessCheck, ModelError> {
        Ok(AccessCheck {
            acl_key: self.acl_key.ok_or(ModelError::missing("aclKey"))?,
            permissions: self.permissions.unwrap_or_default(),
        })
    }
}

impl Model for AccessCheck {
    type Builder = AccessCheckBuilder;
    const NAME: &'static str = "AccessCheck";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = with_field(AccessCheckBuilder::default(), record.strs("aclKey")?, |b, key| {
            b.set_acl_key(key)
        })?;
        if let Some(permissions) = record.parse_all::<PermissionType>("permissions")? {
            builder = builder.set_permissions(permissions);
        }
        builder.build()
    }

    fn to_builder(&self) -> AccessCheckBuilder {
        AccessCheckBuilder {
            acl_key: Some(self.acl_key.clone()),
            permissions: Some(self.permissions.clone()),
        }
    }
}

impl_model_deserialize!(AccessCheck);
model_predicates!(AccessCheck => is_valid_access_check, is_valid_access_check_array);

/// Answer to an [`AccessCheck`]: which of the requested permissions are held
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub acl_key: Vec<Uuid>,
    pub permissions: IndexMap<PermissionType, bool>,
}

impl Authorization {
    pub fn is_granted(&self, permission: PermissionType) -> bool {
        self.permissions.get(&permission).copied().unwrap_or(false)
    }
}
