use crate::core::error::ModelError;
use crate::models::types::ActionType;
use crate::models::{Acl, Model, PlainRecord};
use crate::{impl_model_deserialize, model_predicates};
use serde::Serialize;
use serde_json::Value;

/// An ACL paired with the mutation to apply to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AclData {
    pub acl: Acl,
    pub action: ActionType,
}

impl AclData {
    pub fn builder() -> AclDataBuilder {
        AclDataBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AclDataBuilder {
    acl: Option<Acl>,
    action: Option<ActionType>,
}

impl AclDataBuilder {
    pub fn set_acl(mut self, acl: Acl) -> Self {
        self.acl = Some(acl);
        self
    }

    pub fn set_action(mut self, action: ActionType) -> Self {
        self.action = Some(action);
        self
    }

    pub fn build(self) -> Result<AclData, ModelError> {
        Ok(AclData {
            acl: self.acl.ok_or(ModelError::missing("acl"))?,
            action: self.action.ok_or(ModelError::missing("action"))?,
        })
    }
}

impl Model for AclData {
    type Builder = AclDataBuilder;
    const NAME: &'static str = "AclData";

    fn from_plain_record(value: &Value) -> Result<Self, ModelError> {
        let record = PlainRecord::new(Self::NAME, value)?;
        let mut builder = AclDataBuilder::default();
        if let Some(acl) = record.model("acl")? {
            builder = builder.set_acl(acl);
        }
        if let Some(action) = record.parse("action")? {
            builder = builder.set_action(action);
        }
        builder.build()
    }

    fn to_builder(&self) -> AclDataBuilder {
        AclDataBuilder {
            acl: Some(self.acl.clone()),
            action: Some(self.action),
        }
    }
}

impl_model_deserialize!(AclData);
model_predicates!(AclData => is_valid_acl_data, is_valid_acl_data_array);
