use crate::core::error::ModelError;
use crate::models::types::PermissionType;
use crate::models::{Model, PlainRecord, Principal};
use crate::{impl_model_deserialize, model_predicates};
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;

/// Access control entry: the permissions granted to one principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ace {
    pub principal: Principal,
    pub permissions: IndexSet<PermissionType>,
}

impl Ace {
    pub fn builder() -> AceBuilder {
        AceBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AceBuilder {
    principal: Option<Principal>,
    permissions: Option<IndexSet<PermissionType>>,
}

impl AceBuilder {
    pub fn set_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn set_permissions(mut self, permissions: impl IntoIterator<Item = PermissionType>) -> Self {
        let permissions: IndexSet<_> = permissions.into_iter().collect();
        if !permissions.is_empty() {
            self.permissions = Some(permissions);
        }
        self
    }

    pub fn build(self) -> Result<Ace, ModelError> {
        Ok(Ace {
            principal: self.principal.ok_or(ModelError::missing("principal"))?,
            permissions: self.permissions.unwrap_or_default(),
        })
    }
}

impl Model for Ace {
    type Builder = AceBuilder;
    const NAME: &'static str = "Ace";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = AceBuilder::default();
        if let Some(principal) = record.model("principal")? {
            builder = builder.set_principal(principal);
        }
        if let Some(permissions) = record.parse_all::<PermissionType>("permissions")? {
            builder = builder.set_permissions(permissions);
        }
        builder.build()
    }

    fn to_builder(&self) -> AceBuilder {
        AceBuilder {
            principal: Some(self.principal.clone()),
            permissions: Some(self.permissions.clone()),
        }
    }
}

impl_model_deserialize!(Ace);
model_predicates!(Ace => is_valid_ace, is_valid_ace_array);
