use crate::core::error::ModelError;
use crate::models::{Model, PlainRecord, Principal, non_empty_string, parse_uuid, with_field};
use crate::{impl_model_deserialize, model_predicates};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A role scoped to one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub organization_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub principal: Principal,
}

impl Role {
    pub fn builder() -> RoleBuilder {
        RoleBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoleBuilder {
    id: Option<Uuid>,
    organization_id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    principal: Option<Principal>,
}

impl RoleBuilder {
    pub fn set_id(mut self, id: &str) -> Result<Self, ModelError> {
        if !id.is_empty() {
            self.id = Some(parse_uuid("id", id)?);
        }
        Ok(self)
    }

    pub fn set_organization_id(mut self, organization_id: &str) -> Result<Self, ModelError> {
        self.organization_id = Some(parse_uuid("organizationId", organization_id)?);
        Ok(self)
    }

    pub fn set_title(mut self, title: &str) -> Result<Self, ModelError> {
        self.title = Some(non_empty_string("title", title)?);
        Ok(self)
    }

    pub fn set_description(mut self, description: &str) -> Result<Self, ModelError> {
        if !description.is_empty() {
            self.description = Some(description.to_string());
        }
        Ok(self)
    }

    pub fn set_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn build(self) -> Result<Role, ModelError> {
        Ok(Role {
            id: self.id,
            organization_id: self
                .organization_id
                .ok_or(ModelError::missing("organizationId"))?,
            title: self.title.ok_or(ModelError::missing("title"))?,
            description: self.description,
            principal: self.principal.ok_or(ModelError::missing("principal"))?,
        })
    }
}

impl Model for Role {
    type Builder = RoleBuilder;
    const NAME: &'static str = "Role";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let builder = RoleBuilder::default();
        let builder = with_field(builder, record.str("id")?, RoleBuilder::set_id)?;
        let builder = with_field(
            builder,
            record.str("organizationId")?,
            RoleBuilder::set_organization_id,
        )?;
        let builder = with_field(builder, record.str("title")?, RoleBuilder::set_title)?;
        let mut builder =
            with_field(builder, record.str("description")?, RoleBuilder::set_description)?;
        if let Some(principal) = record.model("principal")? {
            builder = builder.set_principal(principal);
        }
        builder.build()
    }

    fn to_builder(&self) -> RoleBuilder {
        RoleBuilder {
            id: self.id,
            organization_id: Some(self.organization_id),
            title: Some(self.title.clone()),
            description: self.description.clone(),
            principal: Some(self.principal.clone()),
        }
    }
}

impl_model_deserialize!(Role);
model_predicates!(Role => is_valid_role);
