use crate::core::error::ModelError;
use crate::models::types::PrincipalType;
use crate::models::{Model, PlainRecord, non_empty_string, with_field};
use crate::{impl_model_deserialize, model_predicates};
use serde::Serialize;
use serde_json::Value;

/// An identity reference: a user, a role or an organization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Principal {
    #[serde(rename = "type")]
    pub principal_type: PrincipalType,
    pub id: String,
}

impl Principal {
    pub fn builder() -> PrincipalBuilder {
        PrincipalBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrincipalBuilder {
    principal_type: Option<PrincipalType>,
    id: Option<String>,
}

impl PrincipalBuilder {
    pub fn set_type(mut self, principal_type: PrincipalType) -> Self {
        self.principal_type = Some(principal_type);
        self
    }

    pub fn set_id(mut self, id: &str) -> Result<Self, ModelError> {
        self.id = Some(non_empty_string("id", id)?);
        Ok(self)
    }

    pub fn build(self) -> Result<Principal, ModelError> {
        Ok(Principal {
            principal_type: self.principal_type.ok_or(ModelError::missing("type"))?,
            id: self.id.ok_or(ModelError::missing("id"))?,
        })
    }
}

impl Model for Principal {
    type Builder = PrincipalBuilder;
    const NAME: &'static str = "Principal";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = PrincipalBuilder::default();
        if let Some(principal_type) = record.parse("type")? {
            builder = builder.set_type(principal_type);
        }
        with_field(builder, record.str("id")?, PrincipalBuilder::set_id)?.build()
    }

    fn to_builder(&self) -> PrincipalBuilder {
        PrincipalBuilder {
            principal_type: Some(self.principal_type),
            id: Some(self.id.clone()),
        }
    }
}

impl_model_deserialize!(Principal);
model_predicates!(Principal => is_valid_principal, is_valid_principal_array);
